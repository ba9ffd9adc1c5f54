//! Vault error types for `keepsake-vault`.

use keepsake_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by client-side vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Primitive operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Stored content no longer hashes to its recorded digest.
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure {
        /// Digest recorded with the version.
        expected: String,
        /// Digest of the content actually presented.
        actual: String,
    },

    /// Settings could not be serialized or persisted.
    #[error("settings error: {0}")]
    Settings(String),

    /// Terminal state could not be read or changed, or input ended early.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// I/O error from the filesystem or standard streams.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
