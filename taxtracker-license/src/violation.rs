//! The persisted violation lock.
//!
//! A plain flag file recording that tamper evidence was observed. It is not
//! signed; its mere presence is the signal. The resolver sets it when it
//! detects a clock rollback and clears it on the next fully valid check,
//! and the host reads it to decorate its warning dialogs.

use crate::error::LicenseResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Why the violation lock was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationReason {
    /// The system clock moved backward past the recorded last run.
    Rollback,
}

impl std::fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rollback => f.write_str("rollback"),
        }
    }
}

/// Contents of the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// What was detected.
    pub reason: ViolationReason,
    /// Date of detection.
    pub date: NaiveDate,
}

/// Sets, checks, and clears the violation lock file.
#[derive(Debug, Clone)]
pub struct ViolationLock {
    path: PathBuf,
}

impl ViolationLock {
    /// Creates a lock handle at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Records a violation, unconditionally overwriting any existing lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem write fails.
    pub fn mark(&self, reason: ViolationReason, date: NaiveDate) -> LicenseResult<()> {
        let record = ViolationRecord { reason, date };
        let json = serde_json::to_string(&record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Whether a violation is currently recorded. Existence check only; the
    /// file's contents are never consulted.
    #[must_use]
    pub fn has(&self) -> bool {
        self.path.exists()
    }

    /// Removes the lock if present; a no-op otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> LicenseResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
