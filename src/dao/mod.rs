/// Persisted record definitions.
pub mod models;
/// Shared player registry backends.
pub mod player_store;
/// Storage error types shared by every backend.
pub mod storage;
