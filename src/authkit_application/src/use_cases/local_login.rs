use authkit_core::{Clock, Email, LockoutPolicy, Password, PasswordHasher, TokenService, UserRepository};

use crate::error::AuthenticationError;
use crate::results::AuthenticationOutcome;
use crate::use_cases::issue_session;

/// Local login use case - authenticates email/password credentials.
///
/// Every branch that decides the outcome persists the aggregate first, so
/// the failure counter and lockout survive even when the login is refused.
pub struct LocalLoginUseCase<R, H, T, C>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
    C: Clock,
{
    user_repository: R,
    password_hasher: H,
    token_service: T,
    clock: C,
    lockout_policy: LockoutPolicy,
}

impl<R, H, T, C> LocalLoginUseCase<R, H, T, C>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
    C: Clock,
{
    pub fn new(user_repository: R, password_hasher: H, token_service: T, clock: C) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
            clock,
            lockout_policy: LockoutPolicy::default(),
        }
    }

    pub fn with_lockout_policy(mut self, lockout_policy: LockoutPolicy) -> Self {
        self.lockout_policy = lockout_policy;
        self
    }

    #[tracing::instrument(name = "LocalLoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticationOutcome, AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_email(&email)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        let now = self.clock.now();
        if user.is_locked_out(now) {
            // Same wording as a bad password; see error.rs.
            return Err(AuthenticationError::Unauthorized);
        }

        let Some(password_hash) = user.password_hash().map(str::to_owned) else {
            return Err(AuthenticationError::Validation(
                "This account signs in with Google".to_string(),
            ));
        };

        let is_valid = self.password_hasher.verify(&password, &password_hash).await?;

        user.record_login_attempt(is_valid, &self.lockout_policy, now);
        self.user_repository.update(&mut user).await?;

        if !is_valid {
            return Err(AuthenticationError::Unauthorized);
        }

        if user.is_mfa_enabled() {
            let mfa_pending_token = self.token_service.generate_mfa_pending_token(user.id())?;
            return Ok(AuthenticationOutcome::MfaRequired {
                user_id: user.id(),
                mfa_pending_token,
            });
        }

        issue_session(&self.token_service, &user).await
    }
}
