//! License integrity and anti-tamper checks for TaxTracker.
//!
//! This crate decides, on every application start, whether a signed license
//! artifact is genuine, current, and has not been circumvented by clock
//! manipulation or by editing the application's own persisted state.
//!
//! # Design Principles
//!
//! - **Offline**: no network I/O, ever; licenses are issued out of band and
//!   imported as files
//! - **Total checks**: a check always returns a [`LicenseStatus`], never
//!   panics or errors — unreadable inputs degrade to absent or invalid
//! - **Tamper ordering**: rollback and ledger-tamper evidence always wins
//!   over plain expiry, so a manipulated clock is never reported as a
//!   merely expired license
//! - **No UI**: the host owns all dialogs and feature gating; this crate
//!   only reports
//!
//! # Artifacts
//!
//! Three JSON files under the license directory:
//! - `license_<issued-date>.json` — the license record, HMAC-signed over
//!   `app_id|file_name|expires_at`
//! - `last_run.json` — single-slot signed date of the last successful
//!   check, used to detect backward clock movement
//! - `violation.lock` — unsigned tamper flag; presence alone is the signal
//!
//! Checks are synchronous and not atomic across the ledger and lock files;
//! a multi-threaded host must serialize calls into one resolver. Last
//! writer wins, which is acceptable at once-per-launch frequency.

mod config;
mod error;
mod ledger;
mod loader;
mod resolver;
mod signer;
mod verifier;
mod violation;

pub use config::{APP_ID, LicenseConfig};
pub use error::{LicenseError, LicenseResult};
pub use ledger::{RunLedger, RunLedgerEntry};
pub use loader::{DATE_FORMAT, LicenseLoader, LicenseRecord};
pub use resolver::{
    CLOCK_ROLLBACK, LEDGER_TAMPERING, LicenseStatus, StatusResolver, TIME_MANIPULATION,
};
pub use signer::{Signer, ledger_payload, license_payload};
pub use verifier::{Verifier, VerifyFailure};
pub use violation::{ViolationLock, ViolationReason, ViolationRecord};
