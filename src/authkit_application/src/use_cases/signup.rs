use authkit_core::{Clock, Email, Password, PasswordHasher, User, UserRepository};

use crate::error::AuthenticationError;
use crate::results::UserSummary;

/// Signup use case - creates a local-credentials account.
pub struct SignupUseCase<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    user_repository: R,
    password_hasher: H,
    clock: C,
}

impl<R, H, C> SignupUseCase<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub fn new(user_repository: R, password_hasher: H, clock: C) -> Self {
        Self {
            user_repository,
            password_hasher,
            clock,
        }
    }

    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        name: &str,
    ) -> Result<UserSummary, AuthenticationError> {
        let password_hash = self.password_hasher.hash(&password).await?;
        let mut user = User::create_local(email, name, &password_hash, self.clock.now())?;
        self.user_repository.add(&mut user).await?;
        Ok(UserSummary::from(&user))
    }
}
