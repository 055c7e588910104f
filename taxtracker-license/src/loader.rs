//! Locating and parsing the active license artifact.
//!
//! Licenses are UTF-8 JSON files named `license_<issued-date>.json` inside a
//! single directory; several may coexist after repeated imports. The active
//! one is the lexicographically last *filename*, which matches the latest
//! issue date because ISO-8601 dates sort lexicographically.
//!
//! Known sharp edge, preserved on purpose: selection is by filename, not by
//! `expires_at`. Two coexisting licenses with different expiries can make a
//! shorter-lived but later-issued file win.

use crate::error::LicenseResult;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Date format used in license expiries and filenames.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FILE_PREFIX: &str = "license_";
const FILE_SUFFIX: &str = ".json";

/// A parsed license artifact, prior to verification.
///
/// All fields are optional so that any JSON object loads; the verifier, not
/// the parser, reports which required key is missing. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseRecord {
    /// Product identifier the license was issued for.
    pub app_id: Option<String>,
    /// Original artifact filename, informational but covered by the MAC.
    pub file_name: Option<String>,
    /// Expiry date, `YYYY-MM-DD`.
    pub expires_at: Option<String>,
    /// Lowercase-hex HMAC over `app_id|file_name|expires_at`.
    pub signature: Option<String>,
}

impl LicenseRecord {
    /// Parses the expiry field, if present and well-formed.
    #[must_use]
    pub fn expiry(&self) -> Option<NaiveDate> {
        let raw = self.expires_at.as_deref()?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    }
}

/// Finds and parses the active license artifact in a directory.
#[derive(Debug, Clone)]
pub struct LicenseLoader {
    dir: PathBuf,
}

impl LicenseLoader {
    /// Creates a loader over the given license directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the active license record, or `None` when there is nothing
    /// usable: missing directory, no matching files, malformed JSON, or any
    /// I/O failure. Never errors; failures are logged at debug level.
    #[must_use]
    pub fn load(&self) -> Option<LicenseRecord> {
        match self.read_latest() {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(dir = %self.dir.display(), error = %err, "license load failed");
                None
            }
        }
    }

    fn read_latest(&self) -> LicenseResult<Option<LicenseRecord>> {
        if !self.dir.is_dir() {
            return Ok(None);
        }

        let mut names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Ok(name) = entry.file_name().into_string() {
                if name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX) {
                    names.push(name);
                }
            }
        }

        let Some(latest) = names.into_iter().max() else {
            return Ok(None);
        };

        let contents = fs::read_to_string(self.dir.join(&latest))?;
        let record: LicenseRecord = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }
}
