use thiserror::Error;

use crate::standings::SourceError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Failed to load standings: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Unauthorized")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, BoardError>;
