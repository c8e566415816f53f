use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, google::GoogleUserInfo, password::Password, role::Role, user::User};

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Hashing error: {0}")]
    HashingError(String),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<String, PasswordHasherError>;
    async fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError>;
}

// MfaService port trait and errors
#[derive(Debug, Error)]
pub enum MfaServiceError {
    #[error("Invalid MFA secret: {0}")]
    InvalidSecret(String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// TOTP enrollment and verification.
///
/// `validate_code` must accept the current and immediately adjacent time
/// steps, and reject anything that is not a 6-digit numeric string before
/// touching the cryptographic check.
pub trait MfaService: Send + Sync {
    fn generate_secret(&self) -> String;
    fn validate_code(&self, secret: &str, code: &str) -> Result<bool, MfaServiceError>;
    fn enrollment_uri(&self, email: &Email, secret: &str) -> Result<String, MfaServiceError>;
}

// TokenService port trait and errors
#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Wrong token type for this operation")]
    WrongTokenUse,
    #[error("Token store error: {0}")]
    StoreError(String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenServiceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::WrongTokenUse, Self::WrongTokenUse) => true,
            (Self::StoreError(_), Self::StoreError(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Identity proven by a validated access token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrincipal {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

/// Session token issuance, validation and revocation.
///
/// MFA-pending tokens are scoped solely to completing MFA verification;
/// `validate_access_token` must never accept one. Refresh tokens are opaque
/// and recorded server-side on issue: only a recorded, unrevoked token is
/// live, so a fabricated token is refused even though it carries no
/// verifiable claims of its own.
#[async_trait]
pub trait TokenService: Send + Sync {
    fn generate_access_token(&self, user: &User) -> Result<String, TokenServiceError>;
    async fn issue_refresh_token(&self) -> Result<String, TokenServiceError>;
    fn generate_mfa_pending_token(&self, user_id: Uuid) -> Result<String, TokenServiceError>;
    fn validate_access_token(&self, token: &str) -> Result<TokenPrincipal, TokenServiceError>;
    /// Signature-only validation: tolerates an expired `exp` so a refresh
    /// request can identify its caller, but still rejects tampering.
    fn claims_from_expired_token(&self, token: &str)
    -> Result<TokenPrincipal, TokenServiceError>;
    fn validate_mfa_pending_token(&self, token: &str) -> Result<Uuid, TokenServiceError>;
    async fn revoke_refresh_token(&self, token: &str) -> Result<(), TokenServiceError>;
    async fn is_refresh_token_live(&self, token: &str) -> Result<bool, TokenServiceError>;
}

// GoogleTokenVerifier port trait and errors
#[derive(Debug, Error)]
pub enum GoogleVerifierError {
    #[error("Invalid Google ID token: {0}")]
    InvalidToken(String),
    #[error("Verification request failed: {0}")]
    RequestFailed(String),
}

/// Out-of-band validation of a Google ID token against the configured
/// audience and issuer, yielding the verified claims.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleUserInfo, GoogleVerifierError>;
}

/// Injected time source; event timestamps stay deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
