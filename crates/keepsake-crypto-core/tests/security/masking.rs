//! Secret material never shows up in formatted output.

use keepsake_crypto_core::memory::SecretBytes;
use keepsake_crypto_core::secret::generate_secret;

#[test]
fn debug_is_identical_for_any_content() {
    let a = SecretBytes::new(&[0xDE; 64]);
    let b = SecretBytes::new(&[0x42; 64]);
    assert_eq!(format!("{a:?}"), format!("{b:?}"));
    assert_eq!(format!("{a}"), "SecretBytes(***)");
}

#[test]
fn generated_secret_is_masked_inside_containers() {
    let secrets = vec![generate_secret(16).unwrap(), generate_secret(0).unwrap()];
    assert_eq!(
        format!("{secrets:?}"),
        "[SecretBytes(***), SecretBytes(***)]"
    );
}
