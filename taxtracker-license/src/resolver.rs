//! The orchestration state machine: one status per check.
//!
//! A check is a pure function of the system date, the license directory,
//! the ledger file, and the lock file. It is total: every path returns a
//! status, nothing panics or errors out. Rollback and tamper evidence is
//! evaluated *before* plain expiry so a tampered environment can never be
//! reported as merely expired.

use crate::config::LicenseConfig;
use crate::ledger::RunLedger;
use crate::loader::LicenseLoader;
use crate::signer::Signer;
use crate::verifier::{Verifier, VerifyFailure};
use crate::violation::{ViolationLock, ViolationReason};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reason reported when the ledger file exists but does not load.
pub const LEDGER_TAMPERING: &str = "ledger tampering detected";

/// Reason reported when today precedes the recorded last run.
pub const CLOCK_ROLLBACK: &str = "system clock moved backward";

/// Reason reported when the recorded last run postdates the expiry.
pub const TIME_MANIPULATION: &str = "time manipulation detected";

/// Outcome of a license check. Produced fresh every check, never persisted.
///
/// The host maps these to dialogs and feature gating; this subsystem never
/// renders UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LicenseStatus {
    /// No usable license artifact was found.
    Missing,
    /// The license or the environment failed an integrity check.
    Invalid {
        /// What failed.
        reason: String,
    },
    /// The license is genuine but past its expiry date.
    Expired,
    /// Tamper evidence was observed; a violation has been recorded.
    Warning {
        /// What was observed.
        reason: String,
    },
    /// The license is genuine and current.
    Valid {
        /// The license's resolved expiry date.
        expires_at: NaiveDate,
    },
}

impl LicenseStatus {
    /// Returns true if the host may enable full functionality.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the failure or warning reason, if this status carries one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Invalid { reason } | Self::Warning { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns the resolved expiry for a valid license.
    #[must_use]
    pub fn expires_at(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid { expires_at } => Some(*expires_at),
            _ => None,
        }
    }
}

/// Drives loader, verifier, ledger, and lock into one status decision.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    loader: LicenseLoader,
    verifier: Verifier,
    ledger: RunLedger,
    lock: ViolationLock,
}

impl StatusResolver {
    /// Builds a resolver from an explicit configuration.
    #[must_use]
    pub fn new(config: LicenseConfig) -> Self {
        let signer = Signer::new(config.secret);
        Self {
            loader: LicenseLoader::new(config.license_dir),
            verifier: Verifier::new(config.app_id.clone(), signer.clone()),
            ledger: RunLedger::new(config.ledger_path, config.app_id, signer),
            lock: ViolationLock::new(config.lock_path),
        }
    }

    /// Builds a resolver with the production configuration rooted at the
    /// application directory.
    #[must_use]
    pub fn with_root(app_root: &std::path::Path) -> Self {
        Self::new(LicenseConfig::with_root(app_root))
    }

    /// Runs a check against the wall-clock local date.
    #[must_use]
    pub fn check(&self) -> LicenseStatus {
        self.resolve_at(Local::now().date_naive())
    }

    /// Runs a check as of `today`. Deterministic and total.
    ///
    /// Write failures on the ledger or lock are logged and do not abort the
    /// check; each check re-evaluates disk state from scratch.
    #[must_use]
    pub fn resolve_at(&self, today: NaiveDate) -> LicenseStatus {
        let Some(record) = self.loader.load() else {
            return LicenseStatus::Missing;
        };

        let verdict = self.verifier.verify(&record, today);

        // Every branch past this point needs a resolved expiry: the
        // ledger-vs-expiry comparison runs even when verification failed.
        let Some(expiry) = record.expiry() else {
            let reason = if record.expires_at.is_some() {
                VerifyFailure::MalformedExpiry.to_string()
            } else {
                match &verdict {
                    Err(failure) => failure.to_string(),
                    Ok(_) => VerifyFailure::MissingKey("expires_at").to_string(),
                }
            };
            return LicenseStatus::Invalid { reason };
        };

        // The ledger has exactly one writer: us. A file that is present but
        // fails to load (bad JSON or bad signature) was edited by someone
        // else. Absence is just a first launch.
        let ledger_present = self.ledger.exists();
        let prior = self.ledger.load();
        if ledger_present && prior.is_none() {
            return LicenseStatus::Invalid {
                reason: LEDGER_TAMPERING.to_string(),
            };
        }

        if let Some(entry) = prior {
            if today < entry.last_run {
                if let Err(err) = self.lock.mark(ViolationReason::Rollback, today) {
                    tracing::warn!(error = %err, "failed to persist violation lock");
                }
                return LicenseStatus::Warning {
                    reason: CLOCK_ROLLBACK.to_string(),
                };
            }

            // A confirmed run after the expiry date, yet today claims the
            // license is still current: the clock was advanced and restored.
            if entry.last_run > expiry {
                return LicenseStatus::Invalid {
                    reason: TIME_MANIPULATION.to_string(),
                };
            }
        }

        if let Err(failure) = verdict {
            return match failure {
                VerifyFailure::Expired => LicenseStatus::Expired,
                other => LicenseStatus::Invalid {
                    reason: other.to_string(),
                },
            };
        }

        if let Err(err) = self.lock.clear() {
            tracing::warn!(error = %err, "failed to clear violation lock");
        }
        if let Err(err) = self.ledger.save(today) {
            tracing::warn!(error = %err, "failed to save run ledger");
        }

        LicenseStatus::Valid { expires_at: expiry }
    }
}
