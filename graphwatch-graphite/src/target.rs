//! Series targets for queue entities.
//!
//! A target names one or more Graphite series:
//!
//! ```text
//! [stats_counts.|stats.gauges.]<namespace>.<host|*>.topic.<topic>[.channel.<channel>].<key>
//! ```
//!
//! Entities only describe their [`SeriesPath`]; prefixing, coloring and URL
//! building are written once on top of that in [`MetricTarget`].

use graphwatch_types::{
    ChannelStats, ColorTag, MetricKind, SeriesPath, Topic, TopicHostStats, RATE_METRIC,
};

use crate::GraphOptions;

/// A Graphite query target and the color to draw it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub expression: String,
    pub color: ColorTag,
}

impl GraphOptions {
    /// Build the target for `key` on the series at `path`.
    pub fn target(&self, path: &SeriesPath<'_>, key: &str) -> Target {
        let expression = format!(
            "{}{}.{}.{}",
            self.prefix(MetricKind::of(key)),
            self.namespace(),
            path,
            key
        );
        Target {
            expression,
            color: ColorTag::of(key),
        }
    }
}

/// Anything that can resolve a Graphite target for a metric key.
///
/// # Example
///
/// ```rust
/// use graphwatch_graphite::{GraphOptions, GraphSettings, MetricTarget, NoPreference};
/// use graphwatch_types::TopicHostStats;
///
/// let settings = GraphSettings::builder().graphite_url("http://graphite.local").build();
/// let options = GraphOptions::resolve(&settings, None, &mut NoPreference).unwrap();
///
/// let stats = TopicHostStats::new("orders", "10.0.0.1:4151");
/// let target = stats.target(&options, "depth");
/// assert_eq!(target.expression, "nsq.10_0_0_1_4151.topic.orders.depth");
/// assert_eq!(target.color.as_str(), "red");
/// ```
pub trait MetricTarget {
    /// The entity-specific part of the series name.
    fn series_path(&self) -> SeriesPath<'_>;

    fn target(&self, options: &GraphOptions, key: &str) -> Target {
        options.target(&self.series_path(), key)
    }

    /// Inline sparkline URL for `key`.
    fn sparkline(&self, options: &GraphOptions, key: &str) -> String {
        let target = self.target(options, key);
        options.sparkline(&target.expression, target.color)
    }

    /// Full-size graph URL for `key`.
    fn large_graph(&self, options: &GraphOptions, key: &str) -> String {
        let target = self.target(options, key);
        options.large_graph(key, &target.expression, target.color)
    }

    /// Target expression for the message rate.
    fn rate_target(&self, options: &GraphOptions) -> String {
        self.target(options, RATE_METRIC).expression
    }
}

impl MetricTarget for Topic {
    fn series_path(&self) -> SeriesPath<'_> {
        Topic::series_path(self)
    }
}

impl MetricTarget for TopicHostStats {
    fn series_path(&self) -> SeriesPath<'_> {
        TopicHostStats::series_path(self)
    }
}

impl MetricTarget for ChannelStats {
    fn series_path(&self) -> SeriesPath<'_> {
        ChannelStats::series_path(self)
    }
}
