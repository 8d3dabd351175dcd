use thiserror::Error;

use crate::record::RecordError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No student IDs left: the table already holds ID {}", i64::MAX)]
    IdsExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;
