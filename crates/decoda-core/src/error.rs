//! Error types for the Decoda core library
//!
//! Decoding itself never produces these: a failed decode is ordinary data
//! (`DecodingFailure`). The variants here cover the fallible operations that
//! sit around the engine, such as `try_parse`, conflict-checked object merges
//! and the JSON bridge.

use crate::decoding::DecodingFailure;
use thiserror::Error;

/// Main error type for Decoda operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value did not satisfy a decoder, surfaced through `try_parse`
    #[error("Decoding failed:\n{message}")]
    Decoding {
        message: String,
        failure: DecodingFailure,
    },

    /// Two object decoders declare the same source field differently
    #[error("Field conflict on '{field}': {left} vs {right}")]
    FieldConflict {
        field: String,
        left: String,
        right: String,
    },

    /// A value cannot be represented on the other side of a conversion
    #[error("Conversion error: {message}")]
    Conversion { message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<DecodingFailure> for Error {
    fn from(failure: DecodingFailure) -> Self {
        Error::Decoding {
            message: failure.reason(),
            failure,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
