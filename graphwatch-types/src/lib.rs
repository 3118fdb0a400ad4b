//! # graphwatch-types
//!
//! Core types for graphing queue metrics. This crate defines the values that
//! every graph request is assembled from: the catalog of viewing windows
//! ("timeframes"), the classification of metric keys, and the queue entities
//! (topics, per-host topic stats, channels) whose series are drawn.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable `serde` to move entities and intervals across process boundaries
//! - **Backend agnostic**: Nothing here knows how a rendering backend spells its queries
//!
//! ## Features
//!
//! - `std` (default): Standard library support (`std::error::Error` impls)
//! - `serde`: Serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use graphwatch_types::{ChannelStats, GraphInterval, MetricKind};
//!
//! let interval = GraphInterval::resolve("24h", true).unwrap();
//! assert_eq!(interval.graph_from(), "-1440min");
//! assert_eq!(interval.graph_until(), "-1min");
//!
//! assert_eq!(MetricKind::of("depth"), MetricKind::Gauge);
//!
//! let channel = ChannelStats::new("orders", "archive", "10.0.0.1:4151");
//! assert_eq!(channel.series_path().to_string(), "10_0_0_1_4151.topic.orders.channel.archive");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod duration;
mod entity;
mod metric;
mod timeframe;

pub use duration::*;
pub use entity::*;
pub use metric::*;
pub use timeframe::*;
