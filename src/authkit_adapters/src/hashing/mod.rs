pub mod argon2_password_hasher;
