//! Metric key classification.

use core::fmt;

/// Keys that report an instantaneous level rather than a running count.
pub const GAUGE_KEYS: [&str; 4] = ["backend_depth", "depth", "clients", "in_flight_count"];

/// Keys whose growth signals a backlog.
pub const ALARM_KEYS: [&str; 2] = ["depth", "deferred_count"];

/// Key used for message-rate displays.
pub const RATE_METRIC: &str = "message_count";

/// How a metric's samples should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetricKind {
    /// Cumulative count; needs rate conversion for display.
    Counter,
    /// Instantaneous value such as queue depth.
    Gauge,
}

impl MetricKind {
    /// Classify a metric key. Anything not in [`GAUGE_KEYS`] is a counter.
    pub fn of(key: &str) -> Self {
        if GAUGE_KEYS.contains(&key) {
            MetricKind::Gauge
        } else {
            MetricKind::Counter
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }

    pub const fn is_gauge(&self) -> bool {
        matches!(self, MetricKind::Gauge)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Series color for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorTag {
    Blue,
    /// Backlog and deferred counts.
    Red,
}

impl ColorTag {
    /// Red for keys in [`ALARM_KEYS`], blue otherwise.
    pub fn of(key: &str) -> Self {
        if ALARM_KEYS.contains(&key) {
            ColorTag::Red
        } else {
            ColorTag::Blue
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Blue => "blue",
            ColorTag::Red => "red",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
