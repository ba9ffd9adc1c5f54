//! `keepsake-crypto-core` — Integrity and identity primitives for keepsake.
//!
//! Secret key generation, SHA-256 content digests, and claim extraction from
//! compact tokens. Zero network, zero async; every operation is a plain
//! synchronous function safe to call from any thread.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod secret;

pub mod digest;

pub mod token;

pub use digest::{hash, verify, Digest, DIGEST_HEX_LEN};
pub use error::CryptoError;
pub use memory::{disable_core_dumps, LockedRegion, SecretBytes};
pub use secret::{generate_secret, generate_secret_with};
pub use token::{extract_expiry, extract_name, parse_claims, Claims, TOKEN_SEGMENTS};
