pub mod email;
pub mod events;
pub mod google;
pub mod lockout;
pub mod password;
pub mod role;
pub mod user;
