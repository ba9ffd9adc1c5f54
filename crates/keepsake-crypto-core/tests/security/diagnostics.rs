//! Every claim-extraction failure leaves a debug-level trace.

use std::io;
use std::sync::{Arc, Mutex};

use keepsake_crypto_core::token::{extract_expiry, extract_name};
use tracing::Level;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn malformed_token_is_logged() {
    let logs = capture(|| {
        assert!(extract_name("only.two").is_err());
    });
    assert!(logs.contains("DEBUG"), "{logs}");
    assert!(logs.contains("token parse error"), "{logs}");
}

#[test]
fn payload_decode_failure_is_logged() {
    let logs = capture(|| {
        assert!(extract_expiry("h.%%%.s").is_err());
    });
    assert!(logs.contains("base64 decode error"), "{logs}");
}

#[test]
fn claims_decode_failure_is_logged() {
    // "bm90IGpzb24" is "not json"
    let logs = capture(|| {
        assert!(extract_name("h.bm90IGpzb24.s").is_err());
    });
    assert!(logs.contains("json decode error"), "{logs}");
}

#[test]
fn success_path_is_quiet() {
    // {"name":"personal"}
    let logs = capture(|| {
        assert_eq!(extract_name("h.eyJuYW1lIjoicGVyc29uYWwifQ.s").unwrap(), "personal");
    });
    assert!(logs.is_empty(), "{logs}");
}
