//! Feature Derivation Error Types

use thiserror::Error;

/// Errors during feature derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Rows reached derivation without a valid timestamp
    ///
    /// `first_row` is a 0-based index into the loaded dataset, not a file
    /// line. Rows dropped by the loader are not counted.
    #[error("{count} row(s) have no valid timestamp, first at dataset row index {first_row} (0-based, after loading); cannot derive calendar features")]
    MissingTimestamp { first_row: usize, count: usize },
}
