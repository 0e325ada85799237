use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("uniqueness constraint violated: {0}")]
    Duplicate(String),

    #[error("conditional write lost: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
