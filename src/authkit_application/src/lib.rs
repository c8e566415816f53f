pub mod error;
pub mod results;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AuthenticationError;
pub use results::{AuthenticationOutcome, UserSummary};
pub use use_cases::{
    change_password::ChangePasswordUseCase,
    google_login::GoogleLoginUseCase,
    local_login::LocalLoginUseCase,
    logout::LogoutUseCase,
    mfa_enrollment::{MfaEnrollment, MfaEnrollmentUseCase},
    refresh_token::RefreshTokenUseCase,
    signup::SignupUseCase,
    update_profile::UpdateProfileUseCase,
    verify_mfa::VerifyMfaUseCase,
};
