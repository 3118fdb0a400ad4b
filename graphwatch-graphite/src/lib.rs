//! # graphwatch-graphite
//!
//! Graphite render URLs and rate lookups for queue metrics.
//!
//! This crate turns abstract metric requests ("depth of this channel",
//! "message rate of that topic") into Graphite target expressions and
//! `/render` URLs. It never talks to Graphite itself: callers fetch the
//! URLs, or embed them in pages for browsers to fetch.
//!
//! ## Flow
//!
//! ```text
//! GraphSettings (startup) ──┐
//! requested timeframe ──────┼──▶ GraphOptions::resolve ──▶ GraphOptions
//! PreferenceStore ──────────┘                                   │
//!                                                               ▼
//! Topic | TopicHostStats | ChannelStats ──▶ MetricTarget ──▶ sparkline / large_graph / rate_target
//!                                                               │
//! rate_query ──▶ (caller fetches) ──▶ parse_rate ◀──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use graphwatch_graphite::{GraphOptions, GraphSettings, MemoryPreference, MetricTarget};
//! use graphwatch_types::Topic;
//!
//! let settings = GraphSettings::builder()
//!     .graphite_url("http://graphite.local")
//!     .build();
//!
//! let mut preference = MemoryPreference::new();
//! let options = GraphOptions::resolve(&settings, Some("24h"), &mut preference).unwrap();
//!
//! let topic = Topic::new("orders");
//! let url = topic.sparkline(&options, "depth");
//! assert!(url.starts_with("http://graphite.local/render?"));
//! assert!(url.contains("from=-1440min"));
//! ```

pub mod error;
pub mod options;
pub mod rate;
pub mod render;
pub mod settings;
pub mod target;

pub use error::GraphiteError;
pub use options::{GraphOptions, MemoryPreference, NoPreference, PreferenceStore, TimeframeSource};
pub use rate::{parse_rate, per_second_rate, rate_query};
pub use render::{large_graph_target, sum_series};
pub use settings::{GraphSettings, GraphSettingsBuilder, DEFAULT_NAMESPACE};
pub use target::{MetricTarget, Target};

// Re-export types for convenience
pub use graphwatch_types::{
    ChannelStats, ColorTag, GraphInterval, MetricKind, Topic, TopicHostStats,
};
