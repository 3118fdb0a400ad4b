//! Command-line queries over graph options.
//!
//! These helpers back the `graphwatch` subcommands; they are kept here so
//! the selection rules can be tested without a terminal.

use anyhow::{bail, Result};
use graphwatch_graphite::{rate_query, GraphOptions, MetricTarget};
use graphwatch_types::{ChannelStats, Topic, TopicHostStats};

/// Which render URL to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Small inline graph.
    Sparkline,
    /// Full-size graph.
    Large,
}

/// Pick the entity described by a topic, optional channel and host list.
///
/// - no channel, no host: the topic across every host
/// - no channel, one host: that host's topic stats
/// - no channel, several hosts: topic stats aggregated across hosts
/// - channel, one host: that host's channel stats
/// - channel, several hosts: channel stats across those hosts
pub fn select_entity(
    topic: &str,
    channel: Option<&str>,
    hosts: &[String],
) -> Result<Box<dyn MetricTarget>> {
    let entity: Box<dyn MetricTarget> = match (channel, hosts) {
        (Some(_), []) => bail!("channel graphs need at least one --host"),
        (Some(channel), [host]) => Box::new(ChannelStats::new(topic, channel, host)),
        (Some(channel), hosts) => {
            let per_host = hosts
                .iter()
                .map(|host| ChannelStats::new(topic, channel, host))
                .collect();
            Box::new(ChannelStats::new(topic, channel, "").with_host_stats(per_host))
        }
        (None, []) => Box::new(Topic::new(topic)),
        (None, [host]) => Box::new(TopicHostStats::new(topic, host)),
        (None, _) => Box::new(TopicHostStats::aggregate(topic)),
    };
    Ok(entity)
}

/// Render URL for `metric` on `entity`, refusing when graphs are disabled.
pub fn graph_url(
    options: &GraphOptions,
    entity: &dyn MetricTarget,
    kind: GraphKind,
    metric: &str,
) -> Result<String> {
    if !options.configured() {
        bail!("graphs are disabled: no Graphite URL configured");
    }
    if !options.enabled() {
        bail!("graphs are turned off for timeframe {:?}", options.interval().timeframe());
    }

    let url = match kind {
        GraphKind::Sparkline => entity.sparkline(options, metric),
        GraphKind::Large => entity.large_graph(options, metric),
    };
    tracing::debug!(%url, ?kind, metric, "built render url");
    Ok(url)
}

/// Rate query path for `entity`.
pub fn rate_path(options: &GraphOptions, entity: &dyn MetricTarget) -> String {
    rate_query(&entity.rate_target(options))
}

/// The timeframe catalog as a small table, `*` marking the active entry.
pub fn timeframe_table(options: &GraphOptions) -> String {
    let mut out = String::new();
    for interval in options.all_intervals() {
        let marker = if interval.is_selected() { "*" } else { " " };
        out.push_str(&format!(
            "{} {:<5} {:<10} {}\n",
            marker,
            interval.timeframe(),
            interval.graph_from(),
            interval.graph_until()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphwatch_graphite::{GraphSettings, NoPreference};

    fn options(url: &str, timeframe: &str) -> GraphOptions {
        let settings = GraphSettings::builder().graphite_url(url).build();
        GraphOptions::resolve(&settings, Some(timeframe), &mut NoPreference).unwrap()
    }

    fn hosts(list: &[&str]) -> Vec<String> {
        list.iter().map(|h| h.to_string()).collect()
    }

    fn rate_target_of(entity: &dyn MetricTarget) -> String {
        entity.rate_target(&options("http://g", "2h"))
    }

    #[test]
    fn topic_without_hosts() {
        let entity = select_entity("orders", None, &[]).unwrap();
        assert_eq!(rate_target_of(entity.as_ref()), "nsq.*.topic.orders.message_count");
    }

    #[test]
    fn topic_on_one_host() {
        let entity = select_entity("orders", None, &hosts(&["10.0.0.1:4151"])).unwrap();
        assert_eq!(
            rate_target_of(entity.as_ref()),
            "nsq.10_0_0_1_4151.topic.orders.message_count"
        );
    }

    #[test]
    fn topic_on_several_hosts() {
        let entity = select_entity("orders", None, &hosts(&["a:1", "b:1"])).unwrap();
        assert_eq!(rate_target_of(entity.as_ref()), "nsq.*.topic.orders.message_count");
    }

    #[test]
    fn channel_needs_a_host() {
        assert!(select_entity("orders", Some("archive"), &[]).is_err());
    }

    #[test]
    fn channel_on_one_and_several_hosts() {
        let single = select_entity("orders", Some("archive"), &hosts(&["a:1"])).unwrap();
        assert_eq!(
            rate_target_of(single.as_ref()),
            "nsq.a_1.topic.orders.channel.archive.message_count"
        );

        let across = select_entity("orders", Some("archive"), &hosts(&["a:1", "b:1"])).unwrap();
        assert_eq!(
            rate_target_of(across.as_ref()),
            "nsq.*.topic.orders.channel.archive.message_count"
        );
    }

    #[test]
    fn graph_url_requires_configuration() {
        let entity = Topic::new("orders");
        let err = graph_url(&options("", "2h"), &entity, GraphKind::Sparkline, "depth")
            .unwrap_err();
        assert!(err.to_string().contains("no Graphite URL"));
    }

    #[test]
    fn graph_url_refuses_off() {
        let entity = Topic::new("orders");
        let err = graph_url(&options("http://g", "off"), &entity, GraphKind::Large, "depth")
            .unwrap_err();
        assert!(err.to_string().contains("turned off"));
    }

    #[test]
    fn graph_url_builds_both_kinds() {
        let opts = options("http://g", "12h");
        let entity = Topic::new("orders");
        let small = graph_url(&opts, &entity, GraphKind::Sparkline, "depth").unwrap();
        let large = graph_url(&opts, &entity, GraphKind::Large, "depth").unwrap();
        assert!(small.contains("width=120"));
        assert!(large.contains("width=800"));
        assert!(large.contains("from=-720min"));
    }

    #[test]
    fn rate_path_is_relative() {
        let opts = options("http://g", "2h");
        let path = rate_path(&opts, &Topic::new("orders"));
        assert!(path.starts_with("/render?format=json&from=-2min"));
    }

    #[test]
    fn table_marks_active_timeframe() {
        let table = timeframe_table(&options("http://g", "24h"));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[3].starts_with("* 24h"));
        assert!(lines[3].contains("-1440min"));
        assert!(lines[6].starts_with("  off"));
    }
}
