//! Session metadata read from the server-issued access token.
//!
//! The token's signature is **not** verified here. The vault name and expiry
//! are used only to label the session and to decide when to ask the server
//! for a fresh token; the server remains the authority on whether a token is
//! valid.

use chrono::{DateTime, TimeDelta, Utc};
use keepsake_crypto_core::token::parse_claims;

use crate::error::VaultError;

/// Vault identity and expiry taken from one access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSession {
    vault_name: String,
    expires_at: DateTime<Utc>,
}

impl TokenSession {
    /// Read the session claims from `token` in a single parse.
    ///
    /// # Errors
    ///
    /// Propagates any claim-extraction error from crypto-core.
    pub fn from_token(token: &str) -> Result<Self, VaultError> {
        let claims = parse_claims(token)?;
        Ok(Self {
            vault_name: claims.name().to_owned(),
            expires_at: claims.expires_at()?,
        })
    }

    /// Vault this token was issued for.
    #[must_use]
    pub fn vault_name(&self) -> &str {
        &self.vault_name
    }

    /// Instant the token stops being accepted.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns `true` if the token expires within `leeway` of `now`.
    ///
    /// An overflowing `now + leeway` counts as expiring.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, leeway: TimeDelta) -> bool {
        now.checked_add_signed(leeway)
            .is_none_or(|horizon| horizon >= self.expires_at)
    }
}
