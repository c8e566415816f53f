use authkit_core::{Role, User};
use serde::Serialize;
use uuid::Uuid;

/// Profile data returned alongside freshly minted tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub roles: Vec<Role>,
    pub is_mfa_enabled: bool,
    pub is_email_verified: bool,
    pub is_workspace_user: bool,
    pub hosted_domain: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        let mut roles: Vec<Role> = user.roles().iter().copied().collect();
        roles.sort_by_key(|r| r.to_string());
        Self {
            id: user.id(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            picture: user.picture().map(str::to_owned),
            roles,
            is_mfa_enabled: user.is_mfa_enabled(),
            is_email_verified: user.is_email_verified(),
            is_workspace_user: user.is_workspace_user(),
            hosted_domain: user.hosted_domain().map(str::to_owned),
        }
    }
}

/// Result of a login-shaped use case.
#[derive(Debug, PartialEq)]
pub enum AuthenticationOutcome {
    /// Primary credentials (and MFA, where enabled) checked out; the session
    /// tokens are ready to hand to the client.
    Success {
        access_token: String,
        refresh_token: String,
        user: UserSummary,
    },
    /// Primary credentials checked out but the account requires MFA. No
    /// session tokens yet - only a restricted token for completing the
    /// challenge.
    MfaRequired {
        user_id: Uuid,
        mfa_pending_token: String,
    },
}
