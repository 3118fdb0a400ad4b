//! Instantaneous message rates.
//!
//! A rate is read from the last complete minute: the service fetches
//! [`rate_query`] from Graphite itself and hands the body to [`parse_rate`].

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::render::{sum_series, RenderParams};
use crate::GraphiteError;

/// Backend-relative render path for the one-minute rate of `expression`.
///
/// Always relative, proxy mode or not: this request is made by the admin
/// service, never by a browser.
///
/// ```rust
/// use graphwatch_graphite::rate_query;
///
/// assert_eq!(
///     rate_query("nsq.*.topic.orders.message_count"),
///     "/render?format=json&from=-2min&target=sumSeries%28nsq.*.topic.orders.message_count%29&until=-1min"
/// );
/// ```
pub fn rate_query(expression: &str) -> String {
    RenderParams::new()
        .set("from", "-2min")
        .set("until", "-1min")
        .set("format", "json")
        .set("target", sum_series(expression))
        .render_url("")
}

/// Body returned to clients asking for a rate.
#[derive(Debug, Serialize)]
struct RatePayload {
    datapoint: String,
}

/// Messages per second in the first datapoint of a rate response.
///
/// The response is a JSON array of series, each with `datapoints` holding
/// `[value, timestamp]` pairs. The value is a one-minute delta.
pub fn per_second_rate(body: &[u8]) -> Result<f64, GraphiteError> {
    let json: Value = serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rate response is not JSON");
        GraphiteError::from(err)
    })?;

    let datapoints = json
        .get(0)
        .and_then(|series| series.get("datapoints"))
        .ok_or(GraphiteError::NoDatapoints)?;

    let delta = datapoints
        .get(0)
        .and_then(|point| point.get(0))
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            debug!(%datapoints, "rate response has no numeric datapoint");
            GraphiteError::MalformedResponse("first datapoint has no numeric value".to_string())
        })?;

    Ok(delta / 60.0)
}

/// Turn a rate response into the `{"datapoint":"<rate>"}` payload, with the
/// per-second rate formatted to two decimals.
///
/// ```rust
/// use graphwatch_graphite::parse_rate;
///
/// let body = br#"[{"target":"x","datapoints":[[120,1000]]}]"#;
/// assert_eq!(parse_rate(body).unwrap(), r#"{"datapoint":"2.00"}"#);
/// ```
pub fn parse_rate(body: &[u8]) -> Result<String, GraphiteError> {
    let rate = per_second_rate(body)?;
    let payload = RatePayload {
        datapoint: format!("{:.2}", rate),
    };
    serde_json::to_string(&payload).map_err(|err| GraphiteError::Serialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_relative_and_sorted() {
        let query = rate_query("nsq.h_1.topic.orders.channel.archive.message_count");
        assert_eq!(
            query,
            "/render?format=json&from=-2min\
             &target=sumSeries%28nsq.h_1.topic.orders.channel.archive.message_count%29\
             &until=-1min"
        );
    }

    #[test]
    fn parse_two_per_second() {
        let body = br#"[{"target":"x","datapoints":[[120,1000]]}]"#;
        assert_eq!(parse_rate(body).unwrap(), r#"{"datapoint":"2.00"}"#);
    }

    #[test]
    fn parse_rounds_to_two_decimals() {
        let body = br#"[{"target":"x","datapoints":[[100.0,1000],[300.0,1060]]}]"#;
        assert_eq!(parse_rate(body).unwrap(), r#"{"datapoint":"1.67"}"#);
    }

    #[test]
    fn parse_zero() {
        let body = br#"[{"target":"x","datapoints":[[0,1000]]}]"#;
        assert_eq!(parse_rate(body).unwrap(), r#"{"datapoint":"0.00"}"#);
    }

    #[test]
    fn only_first_series_counts() {
        let body = br#"[{"datapoints":[[60,1]]},{"datapoints":[[6000,1]]}]"#;
        assert_eq!(per_second_rate(body).unwrap(), 1.0);
    }

    #[test]
    fn missing_datapoints() {
        let body = br#"[{"target":"x"}]"#;
        assert!(matches!(parse_rate(body), Err(GraphiteError::NoDatapoints)));
    }

    #[test]
    fn empty_or_non_array_body_has_no_datapoints() {
        assert!(matches!(parse_rate(b"[]"), Err(GraphiteError::NoDatapoints)));
        assert!(matches!(parse_rate(b"{}"), Err(GraphiteError::NoDatapoints)));
    }

    #[test]
    fn invalid_json() {
        let err = parse_rate(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, GraphiteError::MalformedResponse(_)));
        assert!(err.to_string().starts_with("Failed to parse rate response"));
    }

    #[test]
    fn null_or_missing_value_is_malformed() {
        let null_value = br#"[{"datapoints":[[null,1000]]}]"#;
        assert!(matches!(
            parse_rate(null_value),
            Err(GraphiteError::MalformedResponse(_))
        ));

        let no_points = br#"[{"datapoints":[]}]"#;
        assert!(matches!(
            parse_rate(no_points),
            Err(GraphiteError::MalformedResponse(_))
        ));
    }

    #[test]
    fn not_found_message() {
        assert_eq!(GraphiteError::NoDatapoints.to_string(), "datapoints not found");
    }
}
