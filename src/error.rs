use reqwest::StatusCode;
use thiserror::Error;

/// Ways the identity provider round trip can fail. None of these reach the
/// user; the bridge only traces them.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status code returned: {0}")]
    Status(StatusCode),
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is not a JSON object or array")]
    NotAnObject,
}
