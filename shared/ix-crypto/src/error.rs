//! Key Error Types

use thiserror::Error;

/// Result alias for key handling.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while loading key material.
///
/// Verification itself never errors; a bad signature is simply `false`.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key was not valid hex.
    #[error("Public key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Key decoded to the wrong number of bytes.
    #[error("Public key must be 32 bytes, got {0}")]
    InvalidLength(usize),

    /// Bytes do not describe a point on the curve.
    #[error("Public key rejected: {0}")]
    InvalidKey(#[from] ed25519_dalek::SignatureError),
}
