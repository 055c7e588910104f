//! The signed last-run ledger.
//!
//! A single-slot record of the last date a check succeeded, used to detect
//! backward clock movement. The entry is signed so a user cannot hand-edit
//! `last_run` to erase a detected rollback without breaking the signature;
//! this subsystem is the file's only writer, so "file exists but does not
//! load" is itself tamper evidence. [`RunLedger::exists`] and
//! [`RunLedger::load`] are therefore deliberately separate operations and
//! must not be collapsed into one.

use crate::error::{LicenseError, LicenseResult};
use crate::signer::{Signer, ledger_payload};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A signed last-run entry. Single slot, overwritten on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLedgerEntry {
    /// Date of the last successful check.
    pub last_run: NaiveDate,
    /// Lowercase-hex HMAC over `app_id|last_run`.
    pub signature: String,
}

/// Persists and authenticates the last-run date.
#[derive(Debug, Clone)]
pub struct RunLedger {
    path: PathBuf,
    app_id: String,
    signer: Signer,
}

impl RunLedger {
    /// Creates a ledger at the given path, signing under `app_id`.
    pub fn new(path: impl Into<PathBuf>, app_id: impl Into<String>, signer: Signer) -> Self {
        Self {
            path: path.into(),
            app_id: app_id.into(),
            signer,
        }
    }

    /// Whether the ledger file is present on disk, loadable or not.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes `date` as the new last-run entry, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&self, date: NaiveDate) -> LicenseResult<()> {
        let entry = RunLedgerEntry {
            last_run: date,
            signature: self.sign_date(date),
        };
        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Loads the current entry, or `None` when the file is absent,
    /// malformed, missing keys, or carries a bad signature. Never errors;
    /// the underlying cause is logged at debug level.
    #[must_use]
    pub fn load(&self) -> Option<RunLedgerEntry> {
        if !self.exists() {
            return None;
        }
        match self.read_entry() {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "ledger load failed");
                None
            }
        }
    }

    fn read_entry(&self) -> LicenseResult<RunLedgerEntry> {
        let contents = fs::read_to_string(&self.path)?;
        let entry: RunLedgerEntry = serde_json::from_str(&contents)?;

        if self.sign_date(entry.last_run) != entry.signature {
            return Err(LicenseError::SignatureMismatch("run ledger"));
        }

        Ok(entry)
    }

    fn sign_date(&self, date: NaiveDate) -> String {
        let payload = ledger_payload(&self.app_id, date);
        self.signer.sign(payload.as_bytes())
    }
}
