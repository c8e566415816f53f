pub mod in_memory_refresh_token_store;
pub mod in_memory_user_repository;
pub mod redis_refresh_token_store;
