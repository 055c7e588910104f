//! Keyed-hash signing primitive and canonical payload builders.
//!
//! All persisted artifacts (license records, the run ledger) are
//! authenticated with HMAC-SHA256 over a canonical `|`-joined payload.
//! Field order in the payload builders is fixed for wire compatibility
//! with already-issued licenses; do not reorder.

use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs byte payloads with a fixed secret, producing lowercase-hex MACs.
#[derive(Clone)]
pub struct Signer {
    secret: Vec<u8>,
}

impl Signer {
    /// Creates a signer with the given secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Computes the HMAC-SHA256 of `payload`, hex-encoded in lowercase.
    ///
    /// Deterministic: the same payload and secret always produce the same
    /// output.
    #[must_use]
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Canonical payload for a license record: `app_id|file_name|expires_at`.
#[must_use]
pub fn license_payload(app_id: &str, file_name: &str, expires_at: &str) -> String {
    format!("{app_id}|{file_name}|{expires_at}")
}

/// Canonical payload for a run-ledger entry: `app_id|last_run`.
#[must_use]
pub fn ledger_payload(app_id: &str, last_run: NaiveDate) -> String {
    format!("{app_id}|{}", last_run.format("%Y-%m-%d"))
}
