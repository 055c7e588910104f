//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
///
/// Read paths (license load, ledger load) collapse these to "absent" at the
/// public boundary; write paths (ledger save, violation mark/clear) return
/// them to the caller.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Filesystem read or write failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON is malformed or missing required fields.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted artifact's MAC does not match its contents.
    #[error("signature mismatch on {0}")]
    SignatureMismatch(&'static str),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
