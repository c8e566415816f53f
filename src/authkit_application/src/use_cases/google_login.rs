use authkit_core::{Clock, GoogleTokenVerifier, LockoutPolicy, TokenService, User, UserRepository};

use crate::error::AuthenticationError;
use crate::results::AuthenticationOutcome;
use crate::use_cases::issue_session;

/// Google login use case - verifies a Google ID token and signs the holder
/// in, provisioning an account on first contact.
pub struct GoogleLoginUseCase<R, V, T, C>
where
    R: UserRepository,
    V: GoogleTokenVerifier,
    T: TokenService,
    C: Clock,
{
    user_repository: R,
    token_verifier: V,
    token_service: T,
    clock: C,
    lockout_policy: LockoutPolicy,
}

impl<R, V, T, C> GoogleLoginUseCase<R, V, T, C>
where
    R: UserRepository,
    V: GoogleTokenVerifier,
    T: TokenService,
    C: Clock,
{
    pub fn new(user_repository: R, token_verifier: V, token_service: T, clock: C) -> Self {
        Self {
            user_repository,
            token_verifier,
            token_service,
            clock,
            lockout_policy: LockoutPolicy::default(),
        }
    }

    #[tracing::instrument(name = "GoogleLoginUseCase::execute", skip(self, id_token))]
    pub async fn execute(&self, id_token: &str) -> Result<AuthenticationOutcome, AuthenticationError> {
        let info = self.token_verifier.verify(id_token).await?;
        let now = self.clock.now();

        let mut user = match self.user_repository.get_by_email(&info.email).await? {
            Some(existing) => {
                // An existing account only matches when its linked Google
                // subject agrees; a bare local account is never silently
                // linked here.
                if existing.google_id() != Some(info.subject.as_str()) {
                    return Err(AuthenticationError::Validation(
                        "Email already registered with a different sign-in method".to_string(),
                    ));
                }
                existing
            }
            None => {
                let mut user = User::create_from_google(info, now)?;
                self.user_repository.add(&mut user).await?;
                user
            }
        };

        if user.is_locked_out(now) {
            return Err(AuthenticationError::Unauthorized);
        }

        user.record_login_attempt(true, &self.lockout_policy, now);
        self.user_repository.update(&mut user).await?;

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
