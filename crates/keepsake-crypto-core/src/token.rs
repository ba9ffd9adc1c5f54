//! Identity and expiry claims from compact `header.payload.signature` tokens.
//!
//! # Trust
//!
//! Nothing in this module checks the signature segment. Extracted claims are
//! informational only; a caller must verify the token signature elsewhere
//! before making any trust decision based on them.
//!
//! # Wire format
//!
//! The payload segment is decoded with the **standard** base64 alphabet
//! (`+` and `/`) without padding. The URL-safe alphabet and `=` padding are
//! rejected on this path; the token issuer for this client encodes with the
//! standard one. Decoding is otherwise lenient: non-zero trailing bits are
//! dropped and `\r`/`\n` inside the segment are skipped.
//!
//! Claim keys match case-insensitively (`Name`, `EXP`), a JSON `null`
//! payload or field leaves the zero value, and when a key repeats the last
//! non-null occurrence wins.
//!
//! ```text
//! header . base64-std-nopad({"name": "<vault>", "exp": <unix seconds>}) . signature
//! ```

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use data_encoding::{Encoding, Specification, SpecificationError};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::CryptoError;

/// Number of dot-separated segments in a compact token.
pub const TOKEN_SEGMENTS: usize = 3;

const STANDARD_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Unpadded standard base64 that ignores trailing bits and line breaks.
fn payload_encoding() -> Result<&'static Encoding, CryptoError> {
    static ENCODING: OnceLock<Result<Encoding, SpecificationError>> = OnceLock::new();
    ENCODING
        .get_or_init(|| {
            let mut spec = Specification::new();
            spec.symbols.push_str(STANDARD_SYMBOLS);
            spec.check_trailing_bits = false;
            spec.ignore.push_str("\r\n");
            spec.encoding()
        })
        .as_ref()
        .map_err(|e| CryptoError::PayloadDecode(e.to_string()))
}

/// Claims carried in a token payload.
///
/// Decoding is permissive: a missing or `null` field takes its zero value
/// (empty name, epoch expiry), keys match case-insensitively and unknown
/// fields are ignored. A `null` payload decodes to all zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    name: Option<String>,
    exp: Option<i64>,
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(ClaimsVisitor)
    }
}

struct ClaimsVisitor;

impl<'de> Visitor<'de> for ClaimsVisitor {
    type Value = Claims;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a claims object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Claims, E> {
        Ok(Claims::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Claims, E> {
        Ok(Claims::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Claims, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Claims, A::Error> {
        let mut claims = Claims::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    claims.name = Some(name);
                }
            } else if key.eq_ignore_ascii_case("exp") {
                if let Some(exp) = map.next_value::<Option<i64>>()? {
                    claims.exp = Some(exp);
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(claims)
    }
}

impl Claims {
    /// Identity claim, empty when absent.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Raw expiry in Unix seconds, `0` when absent.
    #[must_use]
    pub fn exp(&self) -> i64 {
        self.exp.unwrap_or_default()
    }

    /// Expiry as an absolute UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ClaimsDecode`] if `exp` lies outside the
    /// representable timestamp range.
    pub fn expires_at(&self) -> Result<DateTime<Utc>, CryptoError> {
        let exp = self.exp();
        DateTime::from_timestamp(exp, 0).ok_or_else(|| {
            tracing::debug!(exp, "token expiry out of range");
            CryptoError::ClaimsDecode(format!("exp {exp} is out of range"))
        })
    }
}

/// Decode the claims of `token` without looking at its signature.
///
/// # Errors
///
/// - [`CryptoError::MalformedToken`] if the token does not have exactly
///   three segments
/// - [`CryptoError::PayloadDecode`] if the payload is not unpadded standard
///   base64
/// - [`CryptoError::ClaimsDecode`] if the decoded payload is neither `null`
///   nor a JSON object with a string `name` and integer `exp`
pub fn parse_claims(token: &str) -> Result<Claims, CryptoError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != TOKEN_SEGMENTS {
        tracing::debug!(segments = segments.len(), "token parse error");
        return Err(CryptoError::MalformedToken {
            segments: segments.len(),
        });
    }

    let payload = payload_encoding()?
        .decode(segments[1].as_bytes())
        .map_err(|e| {
            tracing::debug!(error = %e, "token payload base64 decode error");
            CryptoError::PayloadDecode(e.to_string())
        })?;

    serde_json::from_slice::<Claims>(&payload).map_err(|e| {
        tracing::debug!(error = %e, "token claims json decode error");
        CryptoError::ClaimsDecode(e.to_string())
    })
}

/// Identity (`name`) claim of `token`.
///
/// # Errors
///
/// Any error from [`parse_claims`].
pub fn extract_name(token: &str) -> Result<String, CryptoError> {
    parse_claims(token).map(|claims| claims.name().to_owned())
}

/// Expiry (`exp`) claim of `token` as an absolute UTC instant.
///
/// # Errors
///
/// Any error from [`parse_claims`], or [`CryptoError::ClaimsDecode`] when
/// `exp` is out of range.
pub fn extract_expiry(token: &str) -> Result<DateTime<Utc>, CryptoError> {
    parse_claims(token)?.expires_at()
}
