pub mod change_password;
pub mod google_login;
pub mod local_login;
pub mod logout;
pub mod mfa_enrollment;
pub mod refresh_token;
pub mod signup;
pub mod update_profile;
pub mod verify_mfa;

use authkit_core::{TokenService, User};

use crate::error::AuthenticationError;
use crate::results::{AuthenticationOutcome, UserSummary};

/// Mint a full access/refresh pair for a user whose authentication just
/// completed. The refresh token is recorded server-side as part of issuance.
pub(crate) async fn issue_session<T: TokenService>(
    token_service: &T,
    user: &User,
) -> Result<AuthenticationOutcome, AuthenticationError> {
    let access_token = token_service.generate_access_token(user)?;
    let refresh_token = token_service.issue_refresh_token().await?;
    Ok(AuthenticationOutcome::Success {
        access_token,
        refresh_token,
        user: UserSummary::from(user),
    })
}
