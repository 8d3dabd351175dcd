use rustyline::error::ReadlineError;
use std::io;
use thiserror::Error;

use crate::record::RecordError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Form input is not available here; give the fields as field=value assignments")]
    FormUnavailable,

    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
