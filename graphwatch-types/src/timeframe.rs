//! Timeframe catalog - the named viewing windows a graph can be drawn over.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::{parse_duration, whole_minutes, ParseDurationError};

/// Canonical timeframe labels, in display order.
pub const TIMEFRAMES: [&str; 7] = ["1h", "2h", "12h", "24h", "48h", "168h", TIMEFRAME_OFF];

/// Sentinel label that disables graphs entirely.
pub const TIMEFRAME_OFF: &str = "off";

/// Timeframe used when nothing valid was requested or remembered.
pub const DEFAULT_TIMEFRAME: &str = "2h";

/// Offset that ends every window; the current minute is still being written.
const GRAPH_UNTIL: &str = "-1min";

/// A timeframe label that could not be turned into a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimeframe {
    /// The rejected label.
    pub label: String,
    /// Why the label did not parse as a duration.
    pub reason: ParseDurationError,
}

impl fmt::Display for InvalidTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timeframe {:?}: {}", self.label, self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidTimeframe {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// A resolved viewing window.
///
/// `graph_from` and `graph_until` are backend-relative offsets
/// ("-120min", "-1min"). For the `"off"` timeframe both offsets are empty
/// and the duration is zero; no other label produces a zero duration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphInterval {
    selected: bool,
    timeframe: String,
    graph_from: String,
    graph_until: String,
    duration: Duration,
}

impl GraphInterval {
    /// Resolve a timeframe label into a window.
    ///
    /// ```rust
    /// use graphwatch_types::GraphInterval;
    ///
    /// let interval = GraphInterval::resolve("2h", false).unwrap();
    /// assert_eq!(interval.graph_from(), "-120min");
    /// assert!(GraphInterval::resolve("foo", false).is_err());
    /// ```
    pub fn resolve(label: &str, selected: bool) -> Result<Self, InvalidTimeframe> {
        if label == TIMEFRAME_OFF {
            return Ok(Self::off(selected));
        }

        let duration = parse_duration(label).map_err(|reason| InvalidTimeframe {
            label: label.to_string(),
            reason,
        })?;
        if duration.is_zero() {
            // Only "off" may describe an empty window.
            return Err(InvalidTimeframe {
                label: label.to_string(),
                reason: ParseDurationError::Empty,
            });
        }

        Ok(Self {
            selected,
            timeframe: label.to_string(),
            graph_from: format!("-{}min", whole_minutes(duration)),
            graph_until: GRAPH_UNTIL.to_string(),
            duration,
        })
    }

    /// The disabled window.
    pub fn off(selected: bool) -> Self {
        Self {
            selected,
            timeframe: TIMEFRAME_OFF.to_string(),
            graph_from: String::new(),
            graph_until: String::new(),
            duration: Duration::ZERO,
        }
    }

    /// The canonical label, e.g. "2h" or "off".
    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    /// The `from=` offset handed to the backend.
    pub fn graph_from(&self) -> &str {
        &self.graph_from
    }

    /// The `until=` offset handed to the backend.
    pub fn graph_until(&self) -> &str {
        &self.graph_until
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether this is the active choice in a presented list.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_off(&self) -> bool {
        self.timeframe == TIMEFRAME_OFF
    }

    /// Query-string fragment that re-selects this timeframe, e.g. `t=24h`.
    pub fn url_option(&self) -> String {
        format!("t={}", self.timeframe)
    }
}

/// Whether `label` is one of the canonical [`TIMEFRAMES`].
pub fn is_canonical(label: &str) -> bool {
    TIMEFRAMES.contains(&label)
}

/// Resolve every canonical timeframe, marking `selected` as the active one.
///
/// Only canonical labels are resolved here, so an error means the catalog
/// itself is broken; see [`validate_catalog`].
pub fn build_all(selected: &str) -> Result<Vec<GraphInterval>, InvalidTimeframe> {
    TIMEFRAMES
        .iter()
        .map(|label| GraphInterval::resolve(label, *label == selected))
        .collect()
}

/// Check that every canonical label resolves. Run once at startup.
pub fn validate_catalog() -> Result<(), InvalidTimeframe> {
    build_all(DEFAULT_TIMEFRAME).map(|_| ())
}
