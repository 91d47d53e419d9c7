//! Feature Engineering Engine
//!
//! Derives calendar components and a cyclical hour-of-day encoding from the
//! combined timestamp, and provides the descriptive statistics used by the
//! dashboard aggregations.

mod derive;
mod error;
mod statistics;

pub use derive::{cyclical_hour, CalendarFeatures, FeatureDeriver, HOURS_PER_DAY};
pub use error::FeatureError;
pub use statistics::{pearson, quantile, SummaryStatistics};
