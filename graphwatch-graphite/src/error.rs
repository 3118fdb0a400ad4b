//! Error types for the Graphite backend.

use graphwatch_types::InvalidTimeframe;
use thiserror::Error;

/// Errors that can occur while building graph options or reading rates.
#[derive(Debug, Error)]
pub enum GraphiteError {
    /// The rate response was not JSON, or its first datapoint had no numeric value.
    #[error("Failed to parse rate response: {0}")]
    MalformedResponse(String),

    /// The first series in the rate response had no `datapoints` field.
    #[error("datapoints not found")]
    NoDatapoints,

    /// The rate payload could not be encoded.
    #[error("Failed to encode rate payload: {0}")]
    Serialization(String),

    /// The timeframe preference could not be stored.
    #[error("Failed to persist timeframe preference: {0}")]
    Preference(String),

    /// A canonical timeframe label failed to resolve.
    #[error("Timeframe catalog is broken: {0}")]
    Catalog(#[from] InvalidTimeframe),
}

impl From<serde_json::Error> for GraphiteError {
    fn from(err: serde_json::Error) -> Self {
        GraphiteError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for GraphiteError {
    fn from(err: std::io::Error) -> Self {
        GraphiteError::Preference(err.to_string())
    }
}
