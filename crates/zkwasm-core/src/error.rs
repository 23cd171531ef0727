//! Error types for encoding and signing.

use thiserror::Error;

/// Errors raised by the codecs and the message signer.
///
/// Every operation is fail-fast: the first error aborts it and no partial result is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A value shape the input list format cannot carry.
    #[error("UnsupportedInputType")]
    UnsupportedInputType,

    /// A token that does not parse as `value:tag`.
    #[error("illegal input string: {0}")]
    MalformedToken(String),

    /// The private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signing primitive failed.
    #[error("signing failure: {0}")]
    Signing(#[from] k256::ecdsa::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
