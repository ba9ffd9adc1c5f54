//! Content version history.
//!
//! A [`Version`] is one snapshot of a vault's content, identified by the
//! SHA-256 digest of its bytes and the instant it was recorded. The same
//! content recorded twice yields two versions sharing a hash;
//! [`deduplicate`] collapses those to one entry per hash.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use keepsake_crypto_core::digest::{hash, verify};
use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// One recorded snapshot: `{hash, date}` on the wire.
///
/// `hash` is kept as the raw string it was received with. It is normally a
/// 64-character lowercase hex digest, but history from older clients may
/// carry anything, including an empty string, and it still groups by exact
/// string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Content digest.
    pub hash: String,
    /// When this snapshot was recorded.
    pub date: DateTime<Utc>,
}

impl Version {
    /// Build a version from an existing digest string.
    #[must_use]
    pub fn new(hash: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            hash: hash.into(),
            date,
        }
    }

    /// Stamp `content` with its digest at `date`.
    #[must_use]
    pub fn record(content: &[u8], date: DateTime<Utc>) -> Self {
        Self::new(hash(content), date)
    }

    /// Returns `true` if `content` hashes to this version's digest.
    #[must_use]
    pub fn matches(&self, content: &[u8]) -> bool {
        verify(&self.hash, content)
    }

    /// Check `content` against this version's digest.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::IntegrityFailure`] if the digests differ.
    pub fn ensure_matches(&self, content: &[u8]) -> Result<(), VaultError> {
        if self.matches(content) {
            return Ok(());
        }
        let actual = hash(content);
        tracing::debug!(
            expected = %self.hash,
            actual = %actual,
            "version content does not match recorded digest"
        );
        Err(VaultError::IntegrityFailure {
            expected: self.hash.clone(),
            actual: actual.into(),
        })
    }
}

/// Collapse `versions` to one record per distinct hash.
///
/// - Output order is the order in which each hash first appears.
/// - Each output record carries the latest `date` seen for its hash. A later
///   record only replaces the tracked date when it is strictly more recent,
///   so equal dates never cause an overwrite.
/// - Empty input yields empty output; no hash is ever dropped.
#[must_use]
pub fn deduplicate(versions: &[Version]) -> Vec<Version> {
    let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(versions.len());
    let mut unique: Vec<Version> = Vec::with_capacity(versions.len());

    for version in versions {
        if let Some(&slot) = slot_of.get(version.hash.as_str()) {
            if let Some(kept) = unique.get_mut(slot) {
                if version.date > kept.date {
                    kept.date = version.date;
                }
            }
        } else {
            slot_of.insert(version.hash.as_str(), unique.len());
            unique.push(version.clone());
        }
    }

    unique
}

/// Most recently recorded version; the earliest-listed one wins a tie.
#[must_use]
pub fn latest(versions: &[Version]) -> Option<&Version> {
    versions.iter().fold(None, |best, v| match best {
        Some(b) if v.date <= b.date => Some(b),
        _ => Some(v),
    })
}
