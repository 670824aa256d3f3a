use thiserror::Error as ThisError;
use uniffi::Error;

use crate::error::{DraftError, StoreError, ValidationError};

#[derive(Debug, ThisError, Error)]
#[uniffi(flat_error)]
#[non_exhaustive]
pub enum SetbookError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Draft(String),
    #[error("{0}")]
    Store(String),
    #[error("error: {0}")]
    Common(String),
}

impl From<ValidationError> for SetbookError {
    fn from(e: ValidationError) -> Self {
        SetbookError::Validation(e.to_string())
    }
}

impl From<DraftError> for SetbookError {
    fn from(e: DraftError) -> Self {
        SetbookError::Draft(e.to_string())
    }
}

impl From<StoreError> for SetbookError {
    fn from(e: StoreError) -> Self {
        SetbookError::Store(e.to_string())
    }
}

impl From<anyhow::Error> for SetbookError {
    fn from(e: anyhow::Error) -> Self {
        SetbookError::Common(format!("{:#}", e))
    }
}

impl From<chrono::ParseError> for SetbookError {
    fn from(e: chrono::ParseError) -> Self {
        SetbookError::Common(e.to_string())
    }
}
