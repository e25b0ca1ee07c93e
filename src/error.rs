//! use eckit::error::EcKitError;

use thiserror::Error;

/// Represents errors that can occur in the EcKit library.
///
/// `BufferTooSmall`, `NotFound` and `VerificationFailed` are ordinary
/// outcomes a caller is expected to branch on; the remaining variants
/// describe malformed input or misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcKitError {
    /// The caller-supplied buffer cannot hold the output.
    #[error("Buffer too small: {required} bytes required")]
    BufferTooSmall { required: usize },

    /// A requested extension or entry is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A chain index is past the end of the chain.
    #[error("Index {index} is out of bounds for a chain of length {length}")]
    OutOfBounds { index: usize, length: usize },

    /// Error during PEM, DER or X.509 decoding.
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error due to an out-of-range or otherwise unusable argument.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The certificate carries a key of an unexpected algorithm.
    #[error("Wrong key type: {0}")]
    WrongKeyType(String),

    /// The signature does not verify under the given key.
    #[error("Signature verification failed")]
    VerificationFailed,
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, EcKitError>;

impl From<der::Error> for EcKitError {
    /// Converts a `der::Error` into an `EcKitError`.
    fn from(err: der::Error) -> Self {
        EcKitError::ParseError(err.to_string())
    }
}

impl From<pem::PemError> for EcKitError {
    fn from(err: pem::PemError) -> Self {
        EcKitError::ParseError(err.to_string())
    }
}
