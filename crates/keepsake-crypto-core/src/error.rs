//! Error types for `keepsake-crypto-core`.

use thiserror::Error;

/// Errors produced by the integrity and identity primitives.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The OS entropy source could not supply random bytes.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Compact token did not split into exactly three dot-separated segments.
    #[error("malformed token: expected 3 segments, got {segments}")]
    MalformedToken {
        /// Number of segments actually found.
        segments: usize,
    },

    /// Token payload segment is not valid unpadded standard base64.
    #[error("token payload decode error: {0}")]
    PayloadDecode(String),

    /// Decoded payload is not a JSON object of the expected claim shape.
    #[error("token claims decode error: {0}")]
    ClaimsDecode(String),

    /// String is not a 64-character hexadecimal SHA-256 digest.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Secure memory allocation failure (mlock, rlimit).
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
