use authkit_core::TokenService;

use crate::error::AuthenticationError;

/// Logout use case - invalidates the session's refresh token so the pair
/// cannot be refreshed again. The access token simply runs out its TTL.
pub struct LogoutUseCase<T>
where
    T: TokenService,
{
    token_service: T,
}

impl<T> LogoutUseCase<T>
where
    T: TokenService,
{
    pub fn new(token_service: T) -> Self {
        Self { token_service }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self, refresh_token))]
    pub async fn execute(&self, refresh_token: &str) -> Result<(), AuthenticationError> {
        self.token_service.revoke_refresh_token(refresh_token).await?;
        Ok(())
    }
}
