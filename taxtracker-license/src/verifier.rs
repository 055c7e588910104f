//! License record verification: structure, identity, signature, expiry.

use crate::loader::{DATE_FORMAT, LicenseRecord};
use crate::signer::{Signer, license_payload};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a license record failed verification.
///
/// The `Display` strings are stable: hosts show them to users and persisted
/// logs reference them. Callers that need to branch match on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyFailure {
    /// A required key is absent from the record.
    #[error("missing key: {0}")]
    MissingKey(&'static str),

    /// The record was issued for a different product.
    #[error("license not for this application")]
    WrongApplication,

    /// The MAC does not match the record's contents.
    #[error("bad signature")]
    BadSignature,

    /// `expires_at` is not a `YYYY-MM-DD` date.
    #[error("malformed expiry")]
    MalformedExpiry,

    /// The license expired before today.
    #[error("expired")]
    Expired,
}

/// Validates license records against the product identity and signing key.
#[derive(Debug, Clone)]
pub struct Verifier {
    app_id: String,
    signer: Signer,
}

impl Verifier {
    /// Creates a verifier for the given product identifier.
    pub fn new(app_id: impl Into<String>, signer: Signer) -> Self {
        Self {
            app_id: app_id.into(),
            signer,
        }
    }

    /// Verifies a record against `today`, returning the resolved expiry
    /// date on success.
    ///
    /// Checks run in a fixed order: required keys, product identity, MAC
    /// over the canonical payload, expiry parse, expiry against today. A
    /// license expiring today is still valid; only `expiry < today` fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerifyFailure`] encountered.
    pub fn verify(
        &self,
        record: &LicenseRecord,
        today: NaiveDate,
    ) -> Result<NaiveDate, VerifyFailure> {
        let app_id = record
            .app_id
            .as_deref()
            .ok_or(VerifyFailure::MissingKey("app_id"))?;
        let file_name = record
            .file_name
            .as_deref()
            .ok_or(VerifyFailure::MissingKey("file_name"))?;
        let expires_at = record
            .expires_at
            .as_deref()
            .ok_or(VerifyFailure::MissingKey("expires_at"))?;
        let signature = record
            .signature
            .as_deref()
            .ok_or(VerifyFailure::MissingKey("signature"))?;

        if app_id != self.app_id {
            return Err(VerifyFailure::WrongApplication);
        }

        let payload = license_payload(app_id, file_name, expires_at);
        if self.signer.sign(payload.as_bytes()) != signature {
            return Err(VerifyFailure::BadSignature);
        }

        let expiry = NaiveDate::parse_from_str(expires_at, DATE_FORMAT)
            .map_err(|_| VerifyFailure::MalformedExpiry)?;

        if expiry < today {
            return Err(VerifyFailure::Expired);
        }

        Ok(expiry)
    }
}
