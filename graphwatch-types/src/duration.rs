//! Duration strings in the "72h" / "90m" / "1h30m" notation.
//!
//! Timeframe labels are written the same way Go's `time.ParseDuration`
//! reads them: one or more decimal numbers, each followed by a unit.

use alloc::string::String;
use core::fmt;
use core::time::Duration;

/// Suffix to nanoseconds multiplier.
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1_000.0),
    ("µs", 1_000.0),
    ("μs", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Reasons a duration string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// The input was empty.
    Empty,
    /// A leading `-`; viewing windows only extend into the past.
    Negative,
    /// A component did not start with a valid decimal number.
    InvalidNumber,
    /// A number was not followed by a unit.
    MissingUnit,
    /// A unit suffix that is not one of ns, us, µs, ms, s, m, h.
    UnknownUnit(String),
    /// The total does not fit in a `u64` count of nanoseconds.
    Overflow,
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDurationError::Empty => write!(f, "empty duration"),
            ParseDurationError::Negative => write!(f, "negative duration"),
            ParseDurationError::InvalidNumber => write!(f, "invalid number in duration"),
            ParseDurationError::MissingUnit => write!(f, "missing unit in duration"),
            ParseDurationError::UnknownUnit(unit) => write!(f, "unknown unit {:?} in duration", unit),
            ParseDurationError::Overflow => write!(f, "duration out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDurationError {}

/// Parse duration strings like "2h", "168h", "90m", "1h30m", "1.5h".
///
/// A bare `"0"` is accepted without a unit.
pub fn parse_duration(s: &str) -> Result<Duration, ParseDurationError> {
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    if rest.starts_with('-') {
        return Err(ParseDurationError::Negative);
    }
    if rest.is_empty() {
        return Err(ParseDurationError::Empty);
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos = 0.0_f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() {
            return Err(ParseDurationError::InvalidNumber);
        }
        let value: f64 = number
            .parse()
            .map_err(|_| ParseDurationError::InvalidNumber)?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit);
        }
        let multiplier = UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, multiplier)| *multiplier)
            .ok_or_else(|| ParseDurationError::UnknownUnit(unit.into()))?;

        total_nanos += value * multiplier;
        rest = tail;
    }

    if total_nanos >= u64::MAX as f64 {
        return Err(ParseDurationError::Overflow);
    }
    Ok(Duration::from_nanos(total_nanos as u64))
}

/// Whole minutes in `d`, truncated.
pub const fn whole_minutes(d: Duration) -> u64 {
    d.as_secs() / 60
}
