pub mod google_token_verifier;
pub mod jwt_token_service;
