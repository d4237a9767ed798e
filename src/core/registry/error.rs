use thiserror::Error;

/// Failure taxonomy for registry operations. Validation and conflict are
/// rejected before touching storage; storage errors carry the underlying
/// SQLite failure and are logged rather than surfaced verbatim.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage failure")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
