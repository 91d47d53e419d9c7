//! Tide Gauge Data Model
//!
//! Typed rows for every pipeline stage, the column enums used to address
//! them, and the header schema resolved once when a file is loaded.

mod column;
mod dataset;
mod observation;
mod schema;

pub use column::{Categorical, Column, Level};
pub use dataset::{CleanDataset, Dataset, FeatureTable, RawDataset};
pub use observation::{CleanObservation, FeatureRow, RawObservation, WaterLevels};
pub use schema::{Schema, SchemaError};
