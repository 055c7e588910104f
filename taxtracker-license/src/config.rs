//! Configuration for the license subsystem.
//!
//! The secret, product identifier, and file locations are injectable so
//! tests can run against temporary directories with their own keys. The
//! production values are embedded here and wired up by
//! [`LicenseConfig::with_root`].

use std::path::{Path, PathBuf};

/// Product identifier every license must carry.
pub const APP_ID: &str = "NON_VAT_INCOME_EXPENSE_TAX_TRACKER";

/// Embedded production signing secret.
const SECRET_KEY: &[u8] = b"ARRGGGHHHH";

/// Default license directory, relative to the application root.
const LICENSE_DIR: &str = "data/license";

/// Run-ledger filename inside the license directory.
const LAST_RUN_FILE: &str = "last_run.json";

/// Violation-lock filename inside the license directory.
const VIOLATION_FILE: &str = "violation.lock";

/// Everything the license subsystem needs to operate: identity, key
/// material, and the three filesystem locations it reads or writes.
#[derive(Debug, Clone)]
pub struct LicenseConfig {
    /// Product identifier licenses are checked against.
    pub app_id: String,
    /// HMAC secret for license and ledger signatures.
    pub secret: Vec<u8>,
    /// Directory scanned for `license_<date>.json` artifacts.
    pub license_dir: PathBuf,
    /// Path of the signed last-run ledger file.
    pub ledger_path: PathBuf,
    /// Path of the violation lock file.
    pub lock_path: PathBuf,
}

impl LicenseConfig {
    /// Production configuration rooted at the application directory:
    /// embedded secret and app id, artifacts under `data/license/`.
    #[must_use]
    pub fn with_root(app_root: &Path) -> Self {
        let license_dir = app_root.join(LICENSE_DIR);
        Self {
            app_id: APP_ID.to_string(),
            secret: SECRET_KEY.to_vec(),
            ledger_path: license_dir.join(LAST_RUN_FILE),
            lock_path: license_dir.join(VIOLATION_FILE),
            license_dir,
        }
    }
}
