//! Preprocessing Error Types

use thiserror::Error;
use tide_data::Column;

/// Errors during imputation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// Every cell of the column is missing, so no mean or mode exists
    #[error("Column {column} has no non-missing values across {rows} rows")]
    InsufficientData { column: &'static str, rows: usize },
}

/// Errors during standardization
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// Zero variance over the training rows
    #[error("Column {column} has zero variance over {rows} training rows (value {value})")]
    DegenerateColumn {
        column: Column,
        rows: usize,
        value: f64,
    },

    /// No training rows to fit on
    #[error("Cannot fit scaler on an empty training set")]
    EmptyTrainingSet,

    /// Training row index outside the table
    #[error("Training row {index} is out of range for a table of {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    /// Column was not fitted
    #[error("Column {0} was not fitted")]
    NotFitted(Column),
}
