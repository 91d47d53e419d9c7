//! Dataset Partitioning
//!
//! Splits rows into disjoint train, validation and test subsets, either in
//! timestamp order or shuffled under a fixed seed.

mod error;
mod partition;
mod splitter;

pub use error::SplitError;
pub use partition::{Partition, Partitions};
pub use splitter::{SplitConfig, SplitOrder, Splitter};
