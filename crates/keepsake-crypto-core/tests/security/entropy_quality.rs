//! Entropy smoke tests for `generate_secret`.
//!
//! Shannon entropy of truly random bytes approaches 8.0 bits/byte as the
//! sample grows; small samples read lower because most byte values never
//! appear. Thresholds sit well below the expected value for each size and
//! only catch degenerate output (all zeros, short repeating patterns).
//!
//! | Sample size | Expected entropy | Threshold |
//! |-------------|-----------------|-----------|
//! | 32 bytes    | ~4.88           | 4.0       |
//! | 1 KB        | ~7.81           | 7.5       |
//! | 64 KB       | ~7.997          | 7.99      |

use keepsake_crypto_core::secret::generate_secret;

#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn secret_32_bytes_entropy() {
    let secret = generate_secret(32).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(secret.expose());
    assert!(entropy > 4.0, "32-byte secret entropy too low: {entropy:.4}");
}

#[test]
fn secret_1kb_entropy() {
    let secret = generate_secret(1024).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(secret.expose());
    assert!(entropy > 7.5, "1 KB secret entropy too low: {entropy:.4}");
}

#[test]
fn secret_64kb_entropy() {
    let secret = generate_secret(65_536).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(secret.expose());
    assert!(entropy > 7.99, "64 KB secret entropy too low: {entropy:.4}");
}

#[test]
fn consecutive_secrets_are_distinct() {
    let a = generate_secret(256).expect("CSPRNG should succeed");
    let b = generate_secret(256).expect("CSPRNG should succeed");
    assert_ne!(
        a.expose(),
        b.expose(),
        "two consecutive secrets were identical, CSPRNG may be broken"
    );
}
