use authkit_core::{Password, PasswordHasher, UserRepository};
use uuid::Uuid;

use crate::error::AuthenticationError;

/// Password change use case - replaces the stored credential hash once the
/// current password checks out.
///
/// The current password is always verified here, even for a caller holding a
/// valid access token, so a hijacked session cannot quietly take over the
/// account's credentials.
pub struct ChangePasswordUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    user_repository: R,
    password_hasher: H,
}

impl<R, H> ChangePasswordUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    pub fn new(user_repository: R, password_hasher: H) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: Uuid,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        let Some(password_hash) = user.password_hash().map(str::to_owned) else {
            return Err(AuthenticationError::Validation(
                "This account signs in with Google".to_string(),
            ));
        };

        let is_valid = self
            .password_hasher
            .verify(&current_password, &password_hash)
            .await?;
        if !is_valid {
            return Err(AuthenticationError::Unauthorized);
        }

        let new_hash = self.password_hasher.hash(&new_password).await?;
        user.change_password(&new_hash)?;
        self.user_repository.update(&mut user).await?;

        Ok(())
    }
}
