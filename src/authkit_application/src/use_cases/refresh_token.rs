use authkit_core::{Clock, TokenService, UserRepository};

use crate::error::AuthenticationError;
use crate::results::AuthenticationOutcome;
use crate::use_cases::issue_session;

/// Token refresh use case - exchanges an expired (but authentic) access token
/// plus its refresh token for a fresh pair.
///
/// Only a refresh token the token service itself issued and has not yet
/// revoked is accepted, so holding an expired access token alone mints
/// nothing. Refresh tokens are single-use: the presented token is revoked
/// before the replacement is issued, so a replayed token is refused even if
/// the refresh that consumed it failed later on.
pub struct RefreshTokenUseCase<R, T, C>
where
    R: UserRepository,
    T: TokenService,
    C: Clock,
{
    user_repository: R,
    token_service: T,
    clock: C,
}

impl<R, T, C> RefreshTokenUseCase<R, T, C>
where
    R: UserRepository,
    T: TokenService,
    C: Clock,
{
    pub fn new(user_repository: R, token_service: T, clock: C) -> Self {
        Self {
            user_repository,
            token_service,
            clock,
        }
    }

    #[tracing::instrument(
        name = "RefreshTokenUseCase::execute",
        skip(self, access_token, refresh_token)
    )]
    pub async fn execute(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<AuthenticationOutcome, AuthenticationError> {
        // Signature must verify; expiry is deliberately not enforced here.
        let principal = self.token_service.claims_from_expired_token(access_token)?;

        if !self
            .token_service
            .is_refresh_token_live(refresh_token)
            .await?
        {
            return Err(AuthenticationError::Unauthorized);
        }

        let user = self
            .user_repository
            .get_by_id(principal.user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        if user.is_locked_out(self.clock.now()) {
            return Err(AuthenticationError::Unauthorized);
        }

        self.token_service.revoke_refresh_token(refresh_token).await?;

        issue_session(&self.token_service, &user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeHasher, FakeTokens, FixedClock, InMemoryUsers, fixed_now};
    use authkit_core::{Email, LockoutPolicy, User};
    use uuid::Uuid;

    async fn seed_user(users: &InMemoryUsers) -> Uuid {
        let email = Email::try_from("a@x.com").unwrap();
        let mut user =
            User::create_local(email, "A", &FakeHasher::hash_of("pw"), fixed_now()).unwrap();
        users.add(&mut user).await.unwrap();
        user.id()
    }

    fn use_case(
        users: &InMemoryUsers,
        tokens: &FakeTokens,
    ) -> RefreshTokenUseCase<InMemoryUsers, FakeTokens, FixedClock> {
        RefreshTokenUseCase::new(users.clone(), tokens.clone(), FixedClock(fixed_now()))
    }

    #[tokio::test]
    async fn expired_access_token_with_live_refresh_token_rotates_the_pair() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_user(&users).await;
        let issued = tokens.issue_refresh_token().await.unwrap();

        let outcome = use_case(&users, &tokens)
            .execute(&FakeTokens::expired_access_token_for(id), &issued)
            .await
            .unwrap();

        let AuthenticationOutcome::Success {
            access_token,
            refresh_token,
            user,
        } = outcome
        else {
            panic!("expected success");
        };
        assert_eq!(user.id, id);
        assert_eq!(access_token, FakeTokens::access_token_for(id));
        assert_ne!(refresh_token, issued);

        // The presented refresh token was consumed, the replacement is live.
        assert!(!tokens.is_refresh_token_live(&issued).await.unwrap());
        assert!(tokens.is_refresh_token_live(&refresh_token).await.unwrap());
    }

    #[tokio::test]
    async fn tampered_access_token_is_unauthorized() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        seed_user(&users).await;
        let issued = tokens.issue_refresh_token().await.unwrap();

        let result = use_case(&users, &tokens)
            .execute("garbage-token", &issued)
            .await;
        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);
        assert_eq!(tokens.revoked_count(), 0);
    }

    #[tokio::test]
    async fn refresh_token_the_service_never_issued_is_refused() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_user(&users).await;

        // The access token is authentic, the refresh token is fabricated.
        let result = use_case(&users, &tokens)
            .execute(&FakeTokens::expired_access_token_for(id), "totally-made-up")
            .await;

        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);
        assert_eq!(tokens.revoked_count(), 0);
    }

    #[tokio::test]
    async fn replayed_refresh_token_is_refused() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let id = seed_user(&users).await;
        let refresh = use_case(&users, &tokens);
        let access = FakeTokens::expired_access_token_for(id);
        let issued = tokens.issue_refresh_token().await.unwrap();

        refresh.execute(&access, &issued).await.unwrap();

        let replay = refresh.execute(&access, &issued).await;
        assert_eq!(replay.unwrap_err(), AuthenticationError::Unauthorized);
    }

    #[tokio::test]
    async fn locked_account_cannot_refresh() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let email = Email::try_from("locked@x.com").unwrap();
        let mut user =
            User::create_local(email, "A", &FakeHasher::hash_of("pw"), fixed_now()).unwrap();
        let policy = LockoutPolicy::default();
        for _ in 0..5 {
            user.record_login_attempt(false, &policy, fixed_now());
        }
        users.add(&mut user).await.unwrap();
        let issued = tokens.issue_refresh_token().await.unwrap();

        let result = use_case(&users, &tokens)
            .execute(&FakeTokens::expired_access_token_for(user.id()), &issued)
            .await;
        assert_eq!(result.unwrap_err(), AuthenticationError::Unauthorized);
        // The refused refresh consumed nothing.
        assert_eq!(tokens.revoked_count(), 0);
        assert!(tokens.is_refresh_token_live(&issued).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let users = InMemoryUsers::default();
        let tokens = FakeTokens::default();
        let issued = tokens.issue_refresh_token().await.unwrap();

        let result = use_case(&users, &tokens)
            .execute(&FakeTokens::expired_access_token_for(Uuid::new_v4()), &issued)
            .await;
        assert_eq!(result.unwrap_err(), AuthenticationError::NotFound);
    }
}
