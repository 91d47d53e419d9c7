//! Calendar and Cyclical Feature Derivation

use crate::error::FeatureError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tide_data::{CleanDataset, CleanObservation, FeatureRow, FeatureTable};
use tracing::{debug, info};

/// Period of the hour-of-day encoding
pub const HOURS_PER_DAY: u32 = 24;

/// Encode an hour (0-23) as a point on the unit circle
///
/// Returns `(sin(2π·h/24), cos(2π·h/24))`.
pub fn cyclical_hour(hour: u32) -> (f64, f64) {
    let angle = 2.0 * PI * (hour % HOURS_PER_DAY) as f64 / HOURS_PER_DAY as f64;
    (angle.sin(), angle.cos())
}

/// Features derived from one timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub hour: u32,
    pub sin_hour: f64,
    pub cos_hour: f64,
}

impl CalendarFeatures {
    /// Extract components from a UTC timestamp
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        let hour = timestamp.hour();
        let (sin_hour, cos_hour) = cyclical_hour(hour);
        Self {
            month: timestamp.month(),
            day: timestamp.day(),
            year: timestamp.year(),
            hour,
            sin_hour,
            cos_hour,
        }
    }
}

/// Turns cleaned observations into feature rows
#[derive(Debug, Clone, Default)]
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Create a new feature deriver
    pub fn new() -> Self {
        Self
    }

    /// Derive features for every row
    ///
    /// Fails if any row has no timestamp; no row is emitted in that case.
    pub fn derive(&self, data: CleanDataset) -> Result<FeatureTable, FeatureError> {
        let missing: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|(_, row)| row.timestamp.is_none())
            .map(|(idx, _)| idx)
            .collect();
        if let Some(&first_row) = missing.first() {
            return Err(FeatureError::MissingTimestamp {
                first_row,
                count: missing.len(),
            });
        }

        let has_flag = data.has_flag();
        let rows: Vec<FeatureRow> = data
            .into_rows()
            .into_iter()
            .filter_map(Self::derive_row)
            .collect();

        debug!("Derived Month/Day/Year/Sin_Hour/Cos_Hour for {} rows", rows.len());
        info!("Feature table ready: {} rows", rows.len());
        Ok(FeatureTable::new(rows, has_flag))
    }

    fn derive_row(row: CleanObservation) -> Option<FeatureRow> {
        let timestamp = row.timestamp?;
        let features = CalendarFeatures::from_timestamp(&timestamp);
        Some(FeatureRow {
            station_id: row.station_id,
            timestamp,
            levels: row.levels,
            flag: row.flag,
            month: features.month,
            day: features.day,
            year: features.year,
            sin_hour: features.sin_hour,
            cos_hour: features.cos_hour,
        })
    }
}
