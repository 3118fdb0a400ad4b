//! Layered configuration for the graph settings.
//!
//! Sources, lowest priority first:
//!
//! 1. An optional config file (TOML, JSON or YAML, picked by extension)
//! 2. Environment variables prefixed with `GRAPHWATCH_`
//! 3. Command-line overrides
//!
//! ```toml
//! graphite_url = "http://graphite.local:8080"
//! proxy_graphite = false
//! use_statsd_prefix = true
//! namespace = "nsq"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use graphwatch_graphite::GraphSettings;

/// Prefix for environment overrides, e.g. `GRAPHWATCH_GRAPHITE_URL`.
pub const ENV_PREFIX: &str = "GRAPHWATCH";

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub graphite_url: Option<String>,
    pub proxy_graphite: Option<bool>,
    pub use_statsd_prefix: Option<bool>,
    pub namespace: Option<String>,
}

impl Overrides {
    fn apply(&self, settings: &mut GraphSettings) {
        if let Some(url) = &self.graphite_url {
            settings.graphite_url = url.clone();
        }
        if let Some(proxy) = self.proxy_graphite {
            settings.proxy_graphite = proxy;
        }
        if let Some(prefix) = self.use_statsd_prefix {
            settings.use_statsd_prefix = prefix;
        }
        if let Some(namespace) = &self.namespace {
            settings.namespace = namespace.clone();
        }
    }
}

/// Load settings from `path` (if given), the environment, and `overrides`.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<GraphSettings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("failed to load configuration")?;

    let mut settings: GraphSettings = config
        .try_deserialize()
        .context("invalid graph settings")?;
    overrides.apply(&mut settings);

    tracing::debug!(?settings, "loaded graph settings");
    Ok(settings)
}
