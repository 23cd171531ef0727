use thiserror::Error;

/// Error type for zkWasm client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoding or signing failed before anything was sent.
    #[error(transparent)]
    Core(#[from] zkwasm_core::Error),
    /// HTTP request failed.
    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The endpoint does not form a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The response body is not the expected JSON.
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A signed request was attempted on a client built without a key.
    #[error("no private key configured for signed requests")]
    MissingSigner,
    /// The service answered with a non-200 status or an unsuccessful envelope.
    ///
    /// Carries the raw response body.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
