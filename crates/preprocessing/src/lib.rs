//! Data Cleaning and Scaling
//!
//! Fills missing measurements and categories with column statistics, and
//! standardizes numeric columns with parameters fitted on training rows.

mod error;
mod imputer;
mod scaler;

pub use error::{CleanError, ScaleError};
pub use imputer::{clean, ColumnImputation, FillValue, ImputationReport, ImputationStats};
pub use scaler::{DegeneratePolicy, ScaledMatrix, ScalerConfig, ScalerParams, StandardScaler};
