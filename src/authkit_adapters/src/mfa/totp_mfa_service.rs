use authkit_core::{Email, MfaService, MfaServiceError};
use totp_rs::{Algorithm, Secret, TOTP};

const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP_SECONDS: u64 = 30;

/// RFC 6238 TOTP behind the [`MfaService`] port.
///
/// SHA-1, 6 digits, 30-second steps, one step of skew either way. Secrets are
/// handled in base32 at this boundary; the aggregate stores them verbatim.
#[derive(Clone)]
pub struct TotpMfaService {
    issuer: String,
}

impl TotpMfaService {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    fn totp(&self, secret: &str, account: &str) -> Result<TOTP, MfaServiceError> {
        let secret_bytes = Secret::Encoded(secret.to_string())
            .to_bytes()
            .map_err(|e| MfaServiceError::InvalidSecret(e.to_string()))?;

        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECONDS,
            secret_bytes,
            Some(self.issuer.clone()),
            account.to_string(),
        )
        .map_err(|e| MfaServiceError::InvalidSecret(e.to_string()))
    }
}

impl MfaService for TotpMfaService {
    fn generate_secret(&self) -> String {
        // 160-bit secret, base32-encoded.
        Secret::generate_secret().to_encoded().to_string()
    }

    fn validate_code(&self, secret: &str, code: &str) -> Result<bool, MfaServiceError> {
        // Anything that is not six digits cannot match; skip the HMAC.
        if code.len() != DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(false);
        }

        let totp = self.totp(secret, "")?;
        totp.check_current(code)
            .map_err(|e| MfaServiceError::UnexpectedError(e.to_string()))
    }

    fn enrollment_uri(&self, email: &Email, secret: &str) -> Result<String, MfaServiceError> {
        let totp = self.totp(secret, email.as_str())?;
        Ok(totp.get_url())
    }
}
