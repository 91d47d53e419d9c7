//! Observation Rows
//!
//! One type per pipeline stage. Missing values are only representable
//! before cleaning; a timestamp is only guaranteed after derivation.

use crate::column::{Column, Level};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The eight water level measurements of one observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterLevels<T> {
    #[serde(rename = "Highest")]
    pub highest: T,
    #[serde(rename = "Lowest")]
    pub lowest: T,
    #[serde(rename = "MHHW")]
    pub mhhw: T,
    #[serde(rename = "MHW")]
    pub mhw: T,
    #[serde(rename = "MSL")]
    pub msl: T,
    #[serde(rename = "MTL")]
    pub mtl: T,
    #[serde(rename = "MLW")]
    pub mlw: T,
    #[serde(rename = "MLLW")]
    pub mllw: T,
}

impl<T> WaterLevels<T> {
    /// Build from a function of each level
    pub fn from_fn(mut f: impl FnMut(Level) -> T) -> Self {
        Self {
            highest: f(Level::Highest),
            lowest: f(Level::Lowest),
            mhhw: f(Level::Mhhw),
            mhw: f(Level::Mhw),
            msl: f(Level::Msl),
            mtl: f(Level::Mtl),
            mlw: f(Level::Mlw),
            mllw: f(Level::Mllw),
        }
    }

    /// Borrow one measurement
    pub fn get(&self, level: Level) -> &T {
        match level {
            Level::Highest => &self.highest,
            Level::Lowest => &self.lowest,
            Level::Mhhw => &self.mhhw,
            Level::Mhw => &self.mhw,
            Level::Msl => &self.msl,
            Level::Mtl => &self.mtl,
            Level::Mlw => &self.mlw,
            Level::Mllw => &self.mllw,
        }
    }

    /// Mutably borrow one measurement
    pub fn get_mut(&mut self, level: Level) -> &mut T {
        match level {
            Level::Highest => &mut self.highest,
            Level::Lowest => &mut self.lowest,
            Level::Mhhw => &mut self.mhhw,
            Level::Mhw => &mut self.mhw,
            Level::Msl => &mut self.msl,
            Level::Mtl => &mut self.mtl,
            Level::Mlw => &mut self.mlw,
            Level::Mllw => &mut self.mllw,
        }
    }

    /// Transform every measurement
    pub fn map<U>(self, mut f: impl FnMut(Level, T) -> U) -> WaterLevels<U> {
        WaterLevels {
            highest: f(Level::Highest, self.highest),
            lowest: f(Level::Lowest, self.lowest),
            mhhw: f(Level::Mhhw, self.mhhw),
            mhw: f(Level::Mhw, self.mhw),
            msl: f(Level::Msl, self.msl),
            mtl: f(Level::Mtl, self.mtl),
            mlw: f(Level::Mlw, self.mlw),
            mllw: f(Level::Mllw, self.mllw),
        }
    }
}

/// A row as read from the source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Station identifier, `None` when the cell was missing
    pub station_id: Option<String>,
    /// Combined date and time, `None` when it could not be parsed
    pub timestamp: Option<NaiveDateTime>,
    pub levels: WaterLevels<Option<f64>>,
    /// Informational flag, `None` when missing or when the file has no flag column
    pub flag: Option<String>,
}

/// A row with every measurement and category filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanObservation {
    pub station_id: String,
    /// Never fabricated by cleaning
    pub timestamp: Option<NaiveDateTime>,
    pub levels: WaterLevels<f64>,
    /// `None` only when the source has no flag column
    pub flag: Option<String>,
}

/// A cleaned row with its derived calendar and cyclical features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub station_id: String,
    #[serde(rename = "Datetime")]
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub levels: WaterLevels<f64>,
    #[serde(rename = "Inf", skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Sin_Hour")]
    pub sin_hour: f64,
    #[serde(rename = "Cos_Hour")]
    pub cos_hour: f64,
}

impl FeatureRow {
    /// Numeric value of a column
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Month => self.month as f64,
            Column::Day => self.day as f64,
            Column::Year => self.year as f64,
            Column::SinHour => self.sin_hour,
            Column::CosHour => self.cos_hour,
            level => match level.level() {
                Some(level) => *self.levels.get(level),
                None => f64::NAN,
            },
        }
    }
}
