use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors related to the core domain model.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
}

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),
    #[error("persistence operation failed: {0}")]
    Operation(String),
}
