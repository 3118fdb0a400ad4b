//! Per-request graph options.
//!
//! [`GraphOptions`] is resolved once for each incoming request from the
//! timeframe the request asked for, the timeframe remembered from an earlier
//! response, and the process-wide [`GraphSettings`]. It is never mutated
//! afterwards.

use graphwatch_types::{
    build_all, is_canonical, GraphInterval, InvalidTimeframe, MetricKind, DEFAULT_TIMEFRAME,
};
use tracing::{debug, warn};

use crate::{GraphSettings, GraphiteError};

/// Port for remembering the selected timeframe between requests.
///
/// The transport (cookie, file, session) belongs to the caller.
pub trait PreferenceStore {
    /// The previously persisted timeframe, if any.
    fn get(&self) -> Option<String>;

    /// Persist a timeframe chosen explicitly by the user.
    fn set(&mut self, timeframe: &str) -> Result<(), GraphiteError>;
}

/// A preference held in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreference {
    value: Option<String>,
}

impl MemoryPreference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously persisted value.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl PreferenceStore for MemoryPreference {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, timeframe: &str) -> Result<(), GraphiteError> {
        self.value = Some(timeframe.to_string());
        Ok(())
    }
}

/// A store that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreference;

impl PreferenceStore for NoPreference {
    fn get(&self) -> Option<String> {
        None
    }

    fn set(&mut self, _timeframe: &str) -> Result<(), GraphiteError> {
        Ok(())
    }
}

/// Where the active timeframe label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeSource {
    /// Supplied with the request; persisted for later requests.
    Request,
    /// Read back from the preference store.
    Preference,
    /// Neither was present.
    Default,
}

/// Graph configuration for a single request.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    configured: bool,
    enabled: bool,
    graphite_url: String,
    use_statsd_prefix: bool,
    namespace: String,
    all_intervals: Vec<GraphInterval>,
    interval: GraphInterval,
    source: TimeframeSource,
}

impl GraphOptions {
    /// Resolve the options for one request.
    ///
    /// The timeframe is taken from `requested` when present (and written to
    /// `store`), otherwise from `store`, otherwise `"2h"`. A label that is
    /// malformed or not in the catalog silently falls back to `"2h"`.
    ///
    /// The only error is a broken timeframe catalog, which
    /// [`graphwatch_types::validate_catalog`] rules out at startup.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphwatch_graphite::{GraphOptions, GraphSettings, MemoryPreference, TimeframeSource};
    ///
    /// let settings = GraphSettings::builder().graphite_url("http://graphite.local").build();
    /// let mut store = MemoryPreference::new();
    ///
    /// let options = GraphOptions::resolve(&settings, Some("24h"), &mut store).unwrap();
    /// assert!(options.enabled());
    /// assert_eq!(options.interval().timeframe(), "24h");
    /// assert_eq!(store.value(), Some("24h"));
    ///
    /// // The next request without a timeframe picks up the remembered one.
    /// let options = GraphOptions::resolve(&settings, None, &mut store).unwrap();
    /// assert_eq!(options.source(), TimeframeSource::Preference);
    /// assert_eq!(options.interval().timeframe(), "24h");
    /// ```
    pub fn resolve(
        settings: &GraphSettings,
        requested: Option<&str>,
        store: &mut dyn PreferenceStore,
    ) -> Result<Self, GraphiteError> {
        let (label, source) = match requested.filter(|t| !t.is_empty()) {
            Some(requested) => {
                if let Err(err) = store.set(requested) {
                    warn!(timeframe = requested, error = %err, "failed to persist timeframe");
                }
                (requested.to_string(), TimeframeSource::Request)
            }
            None => match store.get().filter(|t| !t.is_empty()) {
                Some(persisted) => (persisted, TimeframeSource::Preference),
                None => (DEFAULT_TIMEFRAME.to_string(), TimeframeSource::Default),
            },
        };
        debug!(timeframe = %label, ?source, "selected graph timeframe");

        let interval = active_interval(&label)?;
        let all_intervals = build_all(interval.timeframe())?;
        let configured = settings.is_configured();

        Ok(Self {
            configured,
            enabled: configured && !interval.is_off(),
            graphite_url: settings.render_base().to_string(),
            use_statsd_prefix: settings.use_statsd_prefix,
            namespace: settings.namespace.clone(),
            all_intervals,
            interval,
            source,
        })
    }

    /// A Graphite URL was configured (regardless of proxying).
    pub fn configured(&self) -> bool {
        self.configured
    }

    /// Graphs should be drawn: configured, and the timeframe is not "off".
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Base for render URLs. Empty in proxy mode.
    pub fn graphite_url(&self) -> &str {
        &self.graphite_url
    }

    pub fn use_statsd_prefix(&self) -> bool {
        self.use_statsd_prefix
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Every catalog timeframe in display order; exactly one is selected.
    pub fn all_intervals(&self) -> &[GraphInterval] {
        &self.all_intervals
    }

    /// The active window.
    pub fn interval(&self) -> &GraphInterval {
        &self.interval
    }

    pub fn source(&self) -> TimeframeSource {
        self.source
    }

    /// Series prefix for a metric kind under the statsd naming scheme.
    pub fn prefix(&self, kind: MetricKind) -> &'static str {
        match (self.use_statsd_prefix, kind) {
            (false, _) => "",
            (true, MetricKind::Counter) => "stats_counts.",
            (true, MetricKind::Gauge) => "stats.gauges.",
        }
    }
}

/// Resolve `label`, substituting the default for anything outside the catalog.
fn active_interval(label: &str) -> Result<GraphInterval, InvalidTimeframe> {
    match GraphInterval::resolve(label, true) {
        Ok(interval) if is_canonical(label) => return Ok(interval),
        Ok(_) => warn!(timeframe = label, "timeframe not in catalog, using default"),
        Err(err) => warn!(error = %err, "invalid timeframe, using default"),
    }
    GraphInterval::resolve(DEFAULT_TIMEFRAME, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> GraphSettings {
        GraphSettings::builder()
            .graphite_url("http://graphite.local")
            .build()
    }

    struct FailingPreference;

    impl PreferenceStore for FailingPreference {
        fn get(&self) -> Option<String> {
            None
        }

        fn set(&mut self, _timeframe: &str) -> Result<(), GraphiteError> {
            Err(GraphiteError::Preference("read-only".to_string()))
        }
    }

    #[test]
    fn defaults_to_two_hours() {
        let options = GraphOptions::resolve(&configured(), None, &mut NoPreference).unwrap();
        assert_eq!(options.interval().timeframe(), "2h");
        assert_eq!(options.interval().graph_from(), "-120min");
        assert_eq!(options.source(), TimeframeSource::Default);
        assert!(options.configured());
        assert!(options.enabled());
    }

    #[test]
    fn requested_timeframe_is_persisted() {
        let mut store = MemoryPreference::with_value("12h");
        let options = GraphOptions::resolve(&configured(), Some("48h"), &mut store).unwrap();
        assert_eq!(options.interval().timeframe(), "48h");
        assert_eq!(options.source(), TimeframeSource::Request);
        assert_eq!(store.value(), Some("48h"));
    }

    #[test]
    fn persisted_timeframe_is_used() {
        let mut store = MemoryPreference::with_value("168h");
        let options = GraphOptions::resolve(&configured(), None, &mut store).unwrap();
        assert_eq!(options.interval().timeframe(), "168h");
        assert_eq!(options.source(), TimeframeSource::Preference);
    }

    #[test]
    fn empty_request_falls_through_to_preference() {
        let mut store = MemoryPreference::with_value("1h");
        let options = GraphOptions::resolve(&configured(), Some(""), &mut store).unwrap();
        assert_eq!(options.interval().timeframe(), "1h");
        assert_eq!(store.value(), Some("1h"));
    }

    #[test]
    fn invalid_request_falls_back_to_default() {
        let mut store = MemoryPreference::new();
        let fallback = GraphOptions::resolve(&configured(), Some("foo"), &mut store).unwrap();
        let two_hours = GraphOptions::resolve(&configured(), Some("2h"), &mut store).unwrap();
        assert_eq!(fallback.interval(), two_hours.interval());
        assert_eq!(fallback.source(), TimeframeSource::Request);
    }

    #[test]
    fn stale_preference_falls_back_to_default() {
        let mut store = MemoryPreference::with_value("garbage");
        let options = GraphOptions::resolve(&configured(), None, &mut store).unwrap();
        assert_eq!(options.interval().timeframe(), "2h");
    }

    #[test]
    fn non_catalog_duration_falls_back_to_default() {
        let options =
            GraphOptions::resolve(&configured(), Some("90m"), &mut NoPreference).unwrap();
        assert_eq!(options.interval().timeframe(), "2h");
    }

    #[test]
    fn exactly_one_interval_selected() {
        for requested in ["1h", "off", "foo", "90m"] {
            let options =
                GraphOptions::resolve(&configured(), Some(requested), &mut NoPreference).unwrap();
            let selected: Vec<&GraphInterval> = options
                .all_intervals()
                .iter()
                .filter(|i| i.is_selected())
                .collect();
            assert_eq!(selected.len(), 1, "{}", requested);
            assert_eq!(selected[0].timeframe(), options.interval().timeframe());
        }
    }

    #[test]
    fn off_disables_graphs() {
        let options = GraphOptions::resolve(&configured(), Some("off"), &mut NoPreference).unwrap();
        assert!(options.configured());
        assert!(!options.enabled());
        assert!(options.interval().is_off());
    }

    #[test]
    fn unconfigured_is_disabled() {
        let options =
            GraphOptions::resolve(&GraphSettings::default(), Some("1h"), &mut NoPreference)
                .unwrap();
        assert!(!options.configured());
        assert!(!options.enabled());
    }

    #[test]
    fn proxy_mode_keeps_enabled_but_hides_url() {
        let settings = GraphSettings::builder()
            .graphite_url("http://graphite.local")
            .proxy(true)
            .build();
        let options = GraphOptions::resolve(&settings, None, &mut NoPreference).unwrap();
        assert!(options.configured());
        assert!(options.enabled());
        assert_eq!(options.graphite_url(), "");
    }

    #[test]
    fn failed_persist_does_not_fail_resolution() {
        let options =
            GraphOptions::resolve(&configured(), Some("24h"), &mut FailingPreference).unwrap();
        assert_eq!(options.interval().timeframe(), "24h");
    }

    #[test]
    fn prefix_policy() {
        let plain = GraphOptions::resolve(&configured(), None, &mut NoPreference).unwrap();
        assert_eq!(plain.prefix(MetricKind::Counter), "");
        assert_eq!(plain.prefix(MetricKind::Gauge), "");

        let settings = GraphSettings::builder()
            .graphite_url("http://graphite.local")
            .statsd_prefix(true)
            .build();
        let statsd = GraphOptions::resolve(&settings, None, &mut NoPreference).unwrap();
        assert_eq!(statsd.prefix(MetricKind::Counter), "stats_counts.");
        assert_eq!(statsd.prefix(MetricKind::Gauge), "stats.gauges.");
    }
}
