//! # graphwatch
//!
//! Graphite graphs for a queue admin surface: render URLs for topic and
//! channel metrics, per-request timeframe selection, and one-minute message
//! rates.
//!
//! The heavy lifting lives in two sibling crates:
//!
//! - [`graphwatch_types`]: timeframes, metric kinds, queue entities
//! - [`graphwatch_graphite`]: graph options, targets, render URLs, rates
//!
//! This crate adds what a running service or CLI needs around them:
//!
//! - **[`config`]**: layered settings (file, `GRAPHWATCH_*` environment, flags)
//! - **[`preference`]**: cookie- and file-backed timeframe preferences
//! - **[`query`]**: entity selection and output helpers for the `graphwatch` binary
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Sparkline for a topic's depth over the last day
//! graphwatch --graphite-url http://graphite:8080 sparkline --topic orders -m depth -t 24h
//!
//! # Rate query for one channel on one host, then parse what Graphite returned
//! graphwatch rate-query --topic orders --channel archive --host 10.0.0.1:4151
//! curl -s "http://graphite:8080$(graphwatch rate-query --topic orders)" | graphwatch parse-rate
//! ```
//!
//! ### As a library inside an HTTP handler
//!
//! ```
//! use graphwatch::preference::CookiePreference;
//! use graphwatch_graphite::{GraphOptions, GraphSettings, MetricTarget};
//! use graphwatch_types::ChannelStats;
//!
//! // Once, at startup
//! graphwatch_types::validate_catalog().unwrap();
//! let settings = GraphSettings::builder().graphite_url("http://graphite:8080").build();
//!
//! // Per request
//! let mut preference = CookiePreference::from_request("admin:4171", Some("t=48h"));
//! let options = GraphOptions::resolve(&settings, None, &mut preference).unwrap();
//!
//! let channel = ChannelStats::new("orders", "archive", "10.0.0.1:4151");
//! let url = channel.large_graph(&options, "depth");
//! assert!(url.contains("from=-2880min"));
//! ```

pub mod config;
pub mod preference;
pub mod query;

pub use config::{load_settings, Overrides};
pub use preference::{CookiePreference, FilePreference};
pub use query::{graph_url, rate_path, select_entity, timeframe_table, GraphKind};
