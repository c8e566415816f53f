use authkit_core::UserRepository;
use uuid::Uuid;

use crate::error::AuthenticationError;
use crate::results::UserSummary;

/// Profile update use case - changes display name and, optionally, picture.
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    user_repository: R,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repository: R) -> Self {
        Self { user_repository }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        name: &str,
        picture: Option<String>,
    ) -> Result<UserSummary, AuthenticationError> {
        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(AuthenticationError::NotFound)?;

        user.update_profile(name, picture)?;
        self.user_repository.update(&mut user).await?;
        Ok(UserSummary::from(&user))
    }
}
