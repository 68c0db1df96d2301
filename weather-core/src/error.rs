use std::fmt;
use thiserror::Error;

/// Every way a lookup can fail. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Please enter a city name")]
    EmptyInput,
    #[error("No internet connection")]
    NoConnection,
    #[error("Request timed out")]
    Timeout,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Invalid API key")]
    InvalidCredential,
    #[error("Access denied")]
    AccessDenied,
    #[error("City not found")]
    NotFound,
    #[error("Bad request, please check your input")]
    BadRequest,
    #[error("Server error")]
    ServerError,
    #[error("Bad gateway")]
    BadGateway,
    #[error("Service unavailable")]
    ServiceUnavailable,
    #[error("Upstream timed out")]
    UpstreamTimeout,
    #[error("Error: {0}")]
    Other(OtherDetail),
}

/// What ended up in the catch-all bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherDetail {
    /// HTTP status with no dedicated error kind.
    Status(u16),
    /// Transport failure that is neither connect, timeout nor redirect.
    Transport(String),
    /// Success response whose payload could not be normalized.
    Payload(String),
}

impl fmt::Display for OtherDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtherDetail::Status(code) => {
                let reason = reqwest::StatusCode::from_u16(*code)
                    .ok()
                    .and_then(|s| s.canonical_reason());
                match reason {
                    Some(reason) => write!(f, "HTTP status {code} {reason}"),
                    None => write!(f, "HTTP status {code}"),
                }
            }
            OtherDetail::Transport(detail) => f.write_str(detail),
            OtherDetail::Payload(detail) => write!(f, "unexpected response: {detail}"),
        }
    }
}
