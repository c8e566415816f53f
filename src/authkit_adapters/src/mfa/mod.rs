pub mod totp_mfa_service;
