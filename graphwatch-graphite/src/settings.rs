//! Process-wide graph configuration.

use serde::Deserialize;

/// Namespace segment that prefixes every series path by default.
pub const DEFAULT_NAMESPACE: &str = "nsq";

/// Graphite settings, established once at startup and shared read-only
/// by every request.
///
/// # Example
///
/// ```rust
/// use graphwatch_graphite::GraphSettings;
///
/// let settings = GraphSettings::builder()
///     .graphite_url("http://graphite.local")
///     .proxy(true)
///     .statsd_prefix(true)
///     .build();
///
/// assert!(settings.is_configured());
/// assert_eq!(settings.render_base(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Base URL of the Graphite web app. Empty means graphs are not configured.
    pub graphite_url: String,
    /// Hand clients backend-relative URLs so requests are proxied through this service.
    pub proxy_graphite: bool,
    /// Series were written by statsd, which prefixes counters and gauges differently.
    pub use_statsd_prefix: bool,
    /// First segment of every series path.
    pub namespace: String,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            graphite_url: String::new(),
            proxy_graphite: false,
            use_statsd_prefix: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl GraphSettings {
    /// Create a new builder for configuring settings.
    pub fn builder() -> GraphSettingsBuilder {
        GraphSettingsBuilder::default()
    }

    /// Whether a Graphite URL was supplied at all.
    pub fn is_configured(&self) -> bool {
        !self.graphite_url.is_empty()
    }

    /// Base URL that render URLs are built on. Empty when proxying.
    pub fn render_base(&self) -> &str {
        if self.proxy_graphite {
            ""
        } else {
            self.graphite_url.trim_end_matches('/')
        }
    }
}

/// Builder for GraphSettings.
#[derive(Debug, Default)]
pub struct GraphSettingsBuilder {
    settings: GraphSettings,
}

impl GraphSettingsBuilder {
    /// Set the Graphite base URL (e.g., "http://graphite:8080").
    pub fn graphite_url(mut self, url: impl Into<String>) -> Self {
        self.settings.graphite_url = url.into();
        self
    }

    /// Route render requests through this service instead of Graphite directly.
    pub fn proxy(mut self, proxy: bool) -> Self {
        self.settings.proxy_graphite = proxy;
        self
    }

    /// Prefix counters with `stats_counts.` and gauges with `stats.gauges.`.
    pub fn statsd_prefix(mut self, enabled: bool) -> Self {
        self.settings.use_statsd_prefix = enabled;
        self
    }

    /// Set the namespace segment (default: "nsq").
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.settings.namespace = namespace.into();
        self
    }

    /// Build the settings.
    pub fn build(self) -> GraphSettings {
        self.settings
    }
}
