use authkit_core::{
    GoogleVerifierError, MfaServiceError, PasswordHasherError, RefreshTokenStoreError,
    TokenServiceError, UserError, UserRepositoryError,
};

/// Outcome taxonomy exposed to the transport layer.
///
/// Expected business outcomes (unknown user, bad password, lockout) are
/// values of this enum, never panics. Lockout deliberately shares the
/// `Unauthorized` wording with bad credentials so responses cannot be used
/// for account enumeration. Infrastructure failures surface as `Unexpected`
/// with their message intact.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("{0}")]
    Conflict(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<UserRepositoryError> for AuthenticationError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => Self::NotFound,
            UserRepositoryError::AlreadyExists => Self::Conflict(err.to_string()),
            UserRepositoryError::VersionConflict(_) => Self::Conflict(err.to_string()),
            UserRepositoryError::UnexpectedError(msg) => Self::Unexpected(msg),
        }
    }
}

// Aggregate command rejections reaching the workflow are user-triggerable
// input problems (empty name, MFA already enabled, ...).
impl From<UserError> for AuthenticationError {
    fn from(err: UserError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PasswordHasherError> for AuthenticationError {
    fn from(err: PasswordHasherError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<MfaServiceError> for AuthenticationError {
    fn from(err: MfaServiceError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<TokenServiceError> for AuthenticationError {
    fn from(err: TokenServiceError) -> Self {
        match err {
            TokenServiceError::InvalidToken | TokenServiceError::WrongTokenUse => {
                Self::Unauthorized
            }
            TokenServiceError::StoreError(msg) | TokenServiceError::UnexpectedError(msg) => {
                Self::Unexpected(msg)
            }
        }
    }
}

impl From<GoogleVerifierError> for AuthenticationError {
    fn from(err: GoogleVerifierError) -> Self {
        match err {
            GoogleVerifierError::InvalidToken(_) => Self::Unauthorized,
            GoogleVerifierError::RequestFailed(msg) => Self::Unexpected(msg),
        }
    }
}

impl From<RefreshTokenStoreError> for AuthenticationError {
    fn from(err: RefreshTokenStoreError) -> Self {
        Self::Unexpected(err.to_string())
    }
}
