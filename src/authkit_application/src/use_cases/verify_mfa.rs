use authkit_core::{Clock, LockoutPolicy, MfaService, TokenService, UserRepository};
use uuid::Uuid;

use crate::error::AuthenticationError;
use crate::results::AuthenticationOutcome;
use crate::use_cases::issue_session;

/// MFA verification use case - completes a login whose first factor already
/// checked out.
///
/// Wrong codes count against the same lockout policy as wrong passwords, so
/// a TOTP code cannot be brute-forced past the account lock.
pub struct VerifyMfaUseCase<R, M, T, C>
where
    R: UserRepository,
    M: MfaService,
    T: TokenService,
    C: Clock,
{
    user_repository: R,
    mfa_service: M,
    token_service: T,
    clock: C,
    lockout_policy: LockoutPolicy,
}

impl<R, M, T, C> VerifyMfaUseCase<R, M, T, C>
where
    R: UserRepository,
    M: MfaService,
    T: TokenService,
    C: Clock,
{
    pub fn new(user_repository: R, mfa_service: M, token_service: T, clock: C) -> Self {
        Self {
            user_repository,
            mfa_service,
            token_service,
            clock,
            lockout_policy: LockoutPolicy::default(),
        }
    }

    /// Resolve the user from an MFA-pending token, then verify the code.
    #[tracing::instrument(name = "VerifyMfaUseCase::execute", skip(self, mfa_pending_token, code))]
    pub async fn execute(
        &self,
        mfa_pending_token: &str,
        code: &str,
    ) -> Result<AuthenticationOutcome, AuthenticationError> {
        let user_id = self
            .token_service
            .validate_mfa_pending_token(mfa_pending_token)?;
        self.execute_for_user(user_id, code).await
    }

    #[tracing::instrument(name = "VerifyMfaUseCase::execute_for_user", skip(self, code))]
    pub async fn execute_for_user(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<AuthenticationOutcome, AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        if !user.is_mfa_enabled() {
            return Err(AuthenticationError::Validation(
                "MFA is not enabled for this account".to_string(),
            ));
        }

        let now = self.clock.now();
        if user.is_locked_out(now) {
            return Err(AuthenticationError::Unauthorized);
        }

        let secret = user
            .mfa_secret()
            .map(str::to_owned)
            .ok_or_else(|| {
                AuthenticationError::Unexpected("MFA enabled without a secret".to_string())
            })?;

        let is_valid = self.mfa_service.validate_code(&secret, code)?;

        user.record_login_attempt(is_valid, &self.lockout_policy, now);
        self.user_repository.update(&mut user).await?;

        if !is_valid {
            return Err(AuthenticationError::Unauthorized);
        }

        issue_session(&self.token_service, &user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        FAKE_MFA_SECRET, FakeHasher, FakeMfa, FakeTokens, FixedClock, InMemoryUsers,
        VALID_MFA_CODE, fixed_now,
    };
    use authkit_core::{Email, User};

    async fn seed_mfa_user(users: &InMemoryUsers) -> Uuid {
        let email = Email::try_from("mfa@x.com").unwrap();
        let mut user =
            User::create_local(email, "A", &FakeHasher::hash_of("pw"), fixed_now()).unwrap();
        user.enable_mfa(FAKE_MFA_SECRET).unwrap();
        users.add(&mut user).await.unwrap();
        user.id()
    }

    fn use_case(
        users: &InMemoryUsers,
        tokens: &FakeTokens,
    ) -> VerifyMfaUseCase<InMemoryUsers, FakeMfa, FakeTokens, FixedClock> {
        VerifyMfaUseCase::new(users.clone(), FakeMfa, tokens.clone(), FixedClock(fixed_now()))
    }

    #[tokio::test]
    async fn correct_code_completes_the_login() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_mfa_user(&users).await;

        let outcome = use_case(&users, &tokens)
            .execute(&format!("mfa:{id}"), VALID_MFA_CODE)
            .await
            .unwrap();

        let AuthenticationOutcome::Success { user, .. } = outcome else {
            panic!("expected success");
        };
        assert_eq!(user.id, id);

        let stored = users.snapshot(id).await.unwrap();
        assert_eq!(stored.last_login_at(), Some(fixed_now()));
        assert_eq!(stored.failed_login_attempts(), 0);
    }

    #[tokio::test]
    async fn wrong_code_is_unauthorized_and_counts_as_a_failure() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_mfa_user(&users).await;

        let result = use_case(&users, &tokens)
            .execute_for_user(id, "000000")
            .await;
        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);

        let stored = users.snapshot(id).await.unwrap();
        assert_eq!(stored.failed_login_attempts(), 1);
    }

    #[tokio::test]
    async fn five_wrong_codes_lock_the_account() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_mfa_user(&users).await;
        let verify = use_case(&users, &tokens);

        for _ in 0..5 {
            let _ = verify.execute_for_user(id, "000000").await;
        }
        let stored = users.snapshot(id).await.unwrap();
        assert!(stored.lockout_end().is_some());

        // Even the right code is refused while locked.
        let result = verify.execute_for_user(id, VALID_MFA_CODE).await;
        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);
    }

    #[tokio::test]
    async fn access_token_is_not_accepted_as_a_pending_token() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_mfa_user(&users).await;

        let result = use_case(&users, &tokens)
            .execute(&FakeTokens::access_token_for(id), VALID_MFA_CODE)
            .await;
        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);
    }

    #[tokio::test]
    async fn account_without_mfa_is_a_validation_error() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let email = Email::try_from("plain@x.com").unwrap();
        let mut user =
            User::create_local(email, "A", &FakeHasher::hash_of("pw"), fixed_now()).unwrap();
        users.add(&mut user).await.unwrap();

        let result = use_case(&users, &tokens)
            .execute_for_user(user.id(), VALID_MFA_CODE)
            .await;
        assert!(matches!(result, Err(AuthenticationError::Validation(_))));
    }
}
