//! Error type for the HTTP convenience layer.

use thiserror::Error;

/// Failure type used by the [`crate::http`] shorthand constructors.
///
/// The pipeline itself never forces this type on callers; any error type can
/// serve as an endpoint's failure parameter. `HttpError` exists so the common
/// HTTP/JSON wiring works out of the box.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    #[cfg(feature = "reqwest")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[cfg(feature = "json")]
    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}
