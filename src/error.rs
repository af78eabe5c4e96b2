use thiserror::Error;

use crate::models::RecordKind;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Current price {current} exceeds original price {original}")]
    PriceExceedsOriginal { current: f64, original: f64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No course with ID {0}")]
    LedgerNotFound(i64),

    #[error("No {kind} record with ID {id} on course {ledger}")]
    RecordNotFound { ledger: i64, kind: RecordKind, id: i64 },

    #[error("No teacher with ID {0}")]
    TeacherNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BookError>;
