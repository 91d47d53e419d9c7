//! Split Error Types

use thiserror::Error;

/// Errors during partitioning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// Ratio outside its allowed interval
    #[error("{name} must be in {range}, got {value}")]
    InvalidRatio {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
}
