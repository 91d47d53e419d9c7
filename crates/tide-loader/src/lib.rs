//! Tide Gauge File Loader
//!
//! Reads a delimited station file into a [`RawDataset`], combining the
//! separate date and time cells into one UTC timestamp per row.

mod error;
mod loader;
mod timestamp;

pub use error::LoadError;
pub use loader::{load_csv, load_reader, InvalidTimestampPolicy, LoadReport, LoaderConfig};
pub use timestamp::{combine_date_time, TIMESTAMP_FORMATS};

pub use tide_data::RawDataset;
