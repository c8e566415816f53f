use authkit_core::{MfaService, UserRepository};
use uuid::Uuid;

use crate::error::AuthenticationError;

/// Material the client needs to set up an authenticator app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaEnrollment {
    pub secret: String,
    pub enrollment_uri: String,
}

/// MFA enrollment use case - the two-step enable flow plus disable.
///
/// `start` hands out a fresh secret without persisting anything; only
/// `confirm`, which proves the authenticator was provisioned by accepting a
/// valid code, turns MFA on.
pub struct MfaEnrollmentUseCase<R, M>
where
    R: UserRepository,
    M: MfaService,
{
    user_repository: R,
    mfa_service: M,
}

impl<R, M> MfaEnrollmentUseCase<R, M>
where
    R: UserRepository,
    M: MfaService,
{
    pub fn new(user_repository: R, mfa_service: M) -> Self {
        Self {
            user_repository,
            mfa_service,
        }
    }

    #[tracing::instrument(name = "MfaEnrollmentUseCase::start", skip(self))]
    pub async fn start(&self, user_id: Uuid) -> Result<MfaEnrollment, AuthenticationError> {
        let user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        if user.is_mfa_enabled() {
            return Err(AuthenticationError::Validation(
                "MFA is already enabled".to_string(),
            ));
        }

        let secret = self.mfa_service.generate_secret();
        let enrollment_uri = self.mfa_service.enrollment_uri(user.email(), &secret)?;
        Ok(MfaEnrollment {
            secret,
            enrollment_uri,
        })
    }

    #[tracing::instrument(name = "MfaEnrollmentUseCase::confirm", skip(self, secret, code))]
    pub async fn confirm(
        &self,
        user_id: Uuid,
        secret: &str,
        code: &str,
    ) -> Result<(), AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        if !self.mfa_service.validate_code(secret, code)? {
            return Err(AuthenticationError::Unauthorized);
        }

        user.enable_mfa(secret)?;
        self.user_repository.update(&mut user).await?;
        Ok(())
    }

    #[tracing::instrument(name = "MfaEnrollmentUseCase::disable", skip(self))]
    pub async fn disable(&self, user_id: Uuid) -> Result<(), AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        user.disable_mfa()?;
        self.user_repository.update(&mut user).await?;
        Ok(())
    }
}
