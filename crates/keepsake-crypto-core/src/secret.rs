//! Secret key material generation.
//!
//! All randomness comes from `OsRng` (the OS CSPRNG). A failing entropy
//! source is reported once as [`CryptoError::EntropyUnavailable`] and never
//! retried here; the caller decides whether to try again.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::memory::SecretBytes;

/// Generate `n` cryptographically random bytes.
///
/// `n == 0` is valid and yields an empty secret. May block while the host
/// entropy pool initialises; there is no timeout.
///
/// # Errors
///
/// Returns [`CryptoError::EntropyUnavailable`] if the OS CSPRNG fails.
pub fn generate_secret(n: usize) -> Result<SecretBytes, CryptoError> {
    generate_secret_with(&mut OsRng, n)
}

/// Generate `n` random bytes from a caller-supplied CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::EntropyUnavailable`] if `rng` cannot supply bytes.
pub fn generate_secret_with<R>(rng: &mut R, n: usize) -> Result<SecretBytes, CryptoError>
where
    R: RngCore + CryptoRng,
{
    let mut bytes = Zeroizing::new(vec![0u8; n]);
    if let Err(e) = rng.try_fill_bytes(&mut bytes) {
        tracing::debug!(len = n, error = %e, "secure random source failed");
        return Err(CryptoError::EntropyUnavailable(e.to_string()));
    }
    Ok(SecretBytes::new(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RNG whose entropy source is permanently unavailable.
    struct DeadRng;

    impl RngCore for DeadRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy pool closed"))
        }
    }

    impl CryptoRng for DeadRng {}

    #[test]
    fn generates_requested_length() {
        for n in [1, 16, 32, 64, 1000] {
            let secret = generate_secret(n).unwrap();
            assert_eq!(secret.len(), n);
        }
    }

    #[test]
    fn zero_length_is_empty() {
        let secret = generate_secret(0).unwrap();
        assert!(secret.is_empty());
    }

    #[test]
    fn two_calls_differ() {
        let a = generate_secret(32).unwrap();
        let b = generate_secret(32).unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn output_is_not_all_zero() {
        let secret = generate_secret(64).unwrap();
        assert!(secret.expose().iter().any(|&b| b != 0));
    }

    #[test]
    fn failing_source_surfaces_entropy_unavailable() {
        let err = generate_secret_with(&mut DeadRng, 32).unwrap_err();
        match err {
            CryptoError::EntropyUnavailable(msg) => assert!(msg.contains("entropy pool closed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failing_source_fails_even_for_empty_request() {
        assert!(matches!(
            generate_secret_with(&mut DeadRng, 0),
            Err(CryptoError::EntropyUnavailable(_))
        ));
    }
}
