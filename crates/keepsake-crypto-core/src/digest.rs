//! SHA-256 content digests.
//!
//! A [`Digest`] is the lowercase hex encoding of SHA-256 over the exact input
//! bytes. Callers must hash the same byte representation that was used when
//! a digest was first produced, or verification fails.
//!
//! [`verify`] only proves integrity against a claimed digest. It says nothing
//! about who produced the content.

use std::fmt;
use std::str::FromStr;

use data_encoding::HEXLOWER;
use ring::digest::{digest, SHA256};
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest (always [`DIGEST_HEX_LEN`] characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Digest `content`.
    #[must_use]
    pub fn of(content: &[u8]) -> Self {
        Self(HEXLOWER.encode(digest(&SHA256, content).as_ref()))
    }

    /// Parse a hex digest in any letter case, normalising to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidDigest`] if `s` is not exactly 64 hex
    /// characters.
    pub fn parse(s: &str) -> Result<Self, CryptoError> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(CryptoError::InvalidDigest(format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                s.len()
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CryptoError::InvalidDigest(
                "contains non-hexadecimal characters".into(),
            ));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The lowercase hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this digest matches `content`.
    #[must_use]
    pub fn matches(&self, content: &[u8]) -> bool {
        verify(&self.0, content)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.0
    }
}

/// Hash `content` to its SHA-256 digest.
#[must_use]
pub fn hash(content: &[u8]) -> Digest {
    Digest::of(content)
}

/// Recompute the digest of `content` and compare it to `claimed`, ignoring
/// ASCII letter case.
///
/// `claimed` is taken as-is: a malformed string simply fails to match.
#[must_use]
pub fn verify(claimed: &str, content: &[u8]) -> bool {
    let actual = Digest::of(content);
    eq_ignore_case_constant_time(claimed.as_bytes(), actual.as_str().as_bytes())
}

/// Case-insensitive comparison that inspects every byte regardless of where
/// the first difference is.
fn eq_ignore_case_constant_time(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| {
            acc | (x.to_ascii_lowercase() ^ y.to_ascii_lowercase())
        })
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_of_empty_input() {
        assert_eq!(hash(b"").as_str(), EMPTY_SHA256);
    }

    #[test]
    fn hash_is_64_lowercase_hex() {
        let d = hash(b"some vault entry");
        assert_eq!(d.as_str().len(), DIGEST_HEX_LEN);
        assert!(d
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash(b"abc"), hash(b"abc"));
    }

    #[test]
    fn single_bit_flip_changes_hash() {
        assert_ne!(hash(b"abc"), hash(b"abd"));
    }

    #[test]
    fn verify_accepts_own_hash() {
        let content = b"login: alice / password: s3cret";
        assert!(verify(hash(content).as_str(), content));
    }

    #[test]
    fn verify_is_case_insensitive() {
        let content = b"card 4111 1111 1111 1111";
        let upper = hash(content).as_str().to_ascii_uppercase();
        assert!(verify(&upper, content));
    }

    #[test]
    fn verify_rejects_other_content() {
        assert!(!verify(hash(b"one").as_str(), b"two"));
    }

    #[test]
    fn verify_rejects_truncated_digest() {
        let d = hash(b"one");
        assert!(!verify(&d.as_str()[..63], b"one"));
        assert!(!verify("", b"one"));
    }

    #[test]
    fn parse_normalises_case() {
        let d = Digest::parse(&EMPTY_SHA256.to_ascii_uppercase()).unwrap();
        assert_eq!(d.as_str(), EMPTY_SHA256);
        assert_eq!(d, hash(b""));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Digest::parse("abc"),
            Err(CryptoError::InvalidDigest(_))
        ));
        let not_hex = "z".repeat(DIGEST_HEX_LEN);
        assert!(matches!(
            Digest::parse(&not_hex),
            Err(CryptoError::InvalidDigest(_))
        ));
    }

    #[test]
    fn digest_matches_content() {
        let d = Digest::of(b"note");
        assert!(d.matches(b"note"));
        assert!(!d.matches(b"notes"));
    }

    #[test]
    fn serde_as_plain_string() {
        let d = hash(b"");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{EMPTY_SHA256}\""));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<Digest>("\"nope\"").is_err());
    }
}
