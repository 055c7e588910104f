//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::fs;
use taxtracker_license::{LicenseConfig, Signer, StatusResolver, license_payload};
use tempfile::TempDir;

/// Product identifier used by the test suite.
pub const TEST_APP_ID: &str = "NON_VAT_INCOME_EXPENSE_TAX_TRACKER";

/// Signing secret used by the test suite; distinct from production.
pub const TEST_SECRET: &[u8] = b"unit-test-secret";

/// Parses a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date literal")
}

/// A temporary license directory with a matching configuration.
///
/// All three artifacts (licenses, ledger, lock) live in the temp dir, which
/// is removed when the env drops.
pub struct TestEnv {
    pub config: LicenseConfig,
    _dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().to_path_buf();
        let config = LicenseConfig {
            app_id: TEST_APP_ID.to_string(),
            secret: TEST_SECRET.to_vec(),
            license_dir: root.clone(),
            ledger_path: root.join("last_run.json"),
            lock_path: root.join("violation.lock"),
        };
        Self { config, _dir: dir }
    }

    pub fn signer(&self) -> Signer {
        Signer::new(TEST_SECRET)
    }

    pub fn resolver(&self) -> StatusResolver {
        StatusResolver::new(self.config.clone())
    }

    /// Writes a correctly signed license issued on `issued`, expiring on
    /// `expires_at`. Returns the artifact's filename.
    pub fn write_license(&self, issued: &str, expires_at: &str) -> String {
        let file_name = format!("license_{issued}.json");
        let signature = self
            .signer()
            .sign(license_payload(TEST_APP_ID, &file_name, expires_at).as_bytes());
        let body = serde_json::json!({
            "app_id": TEST_APP_ID,
            "file_name": file_name,
            "expires_at": expires_at,
            "signature": signature,
        });
        self.write_file(&file_name, &body.to_string());
        file_name
    }

    /// Writes an arbitrary file into the license directory.
    pub fn write_file(&self, name: &str, contents: &str) {
        fs::write(self.config.license_dir.join(name), contents).expect("write test file");
    }

    /// Reads a file from the license directory.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.config.license_dir.join(name)).expect("read test file")
    }
}
