//! Load-time error type.
//!
//! Every variant is a fatal configuration problem: timeline data is static,
//! so nothing here is transient or retryable. Runtime playback has no
//! recoverable errors by design.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    UnparseableDate { raw: String },

    InvalidCoordinate { place: String, lon: f32, lat: f32 },

    UnknownSource { place: String, source: String },

    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnparseableDate { raw } => {
                write!(f, "event date '{raw}' is not a valid YYYY-MM-DD date")
            }
            ConfigError::InvalidCoordinate { place, lon, lat } => {
                write!(f, "event '{place}' has a non-finite coordinate ({lon}, {lat})")
            }
            ConfigError::UnknownSource { place, source } => write!(
                f,
                "event '{place}' names source '{source}', which matches no earlier event"
            ),
            ConfigError::Json(msg) => write!(f, "timeline json parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
