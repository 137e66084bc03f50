//! Error types for Fetchgate.
//!
//! Two tiers: `ValidationError` for malformed or disallowed client input
//! (always a 4xx with an exact literal message), and `Error::Upstream`
//! for anything unexpected during the outbound call (always flattened to
//! a 500 with a generic message so no internal detail reaches the caller).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Client input rejected before any outbound request is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("url is required")]
    UrlRequired,

    #[error("invalid protocol")]
    InvalidProtocol,

    #[error("blocked host")]
    BlockedHost,

    #[error("method not allowed")]
    MethodNotAllowed,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("proxy failure")]
    Upstream(String),
}

impl Error {
    /// HTTP status code for the error response.
    pub fn status(&self) -> u16 {
        match self {
            Error::Validation(ValidationError::MethodNotAllowed) => 405,
            Error::Validation(_) => 400,
            Error::Upstream(_) => 500,
        }
    }

    /// Wire message for the JSON error body. Upstream detail is never
    /// exposed here; it only goes to the log.
    pub fn message(&self) -> &'static str {
        match self {
            Error::Validation(ValidationError::UrlRequired) => "url is required",
            Error::Validation(ValidationError::InvalidProtocol) => "invalid protocol",
            Error::Validation(ValidationError::BlockedHost) => "blocked host",
            Error::Validation(ValidationError::MethodNotAllowed) => "method not allowed",
            Error::Upstream(_) => "proxy failure",
        }
    }
}
