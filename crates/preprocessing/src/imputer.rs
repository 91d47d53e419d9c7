//! Mean/Mode Imputation
//!
//! Statistics are computed once over the loaded rows before any cell is
//! filled, so substituted values never feed back into a mean.

use crate::error::CleanError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tide_data::{
    Categorical, CleanDataset, CleanObservation, Level, RawDataset, RawObservation, WaterLevels,
};
use tracing::{debug, info};

/// Value used to fill a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum FillValue {
    /// Arithmetic mean of the present values
    Mean(f64),
    /// Most frequent present value
    Mode(String),
}

/// Imputation applied to one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnImputation {
    pub column: String,
    pub fill: FillValue,
    /// Number of cells that were missing and got filled
    pub imputed_cells: usize,
}

/// Per-column record of what the cleaner did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub columns: Vec<ColumnImputation>,
}

impl ImputationReport {
    /// Total number of filled cells
    pub fn total_imputed(&self) -> usize {
        self.columns.iter().map(|c| c.imputed_cells).sum()
    }

    /// Entry for a column by display name
    pub fn column(&self, name: &str) -> Option<&ColumnImputation> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Fill values for every column of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationStats {
    levels: WaterLevels<f64>,
    station: String,
    /// Present only when the dataset has a flag column
    flag: Option<String>,
}

impl ImputationStats {
    /// Compute column means and modes over all rows
    pub fn fit(data: &RawDataset) -> Result<Self, CleanError> {
        let rows = data.len();

        let mut means = [0.0; 8];
        for level in Level::ALL {
            means[level.index()] = column_mean(data, level).ok_or(CleanError::InsufficientData {
                column: level.name(),
                rows,
            })?;
        }

        let station = column_mode(data.iter().map(|r| r.station_id.as_deref())).ok_or(
            CleanError::InsufficientData {
                column: Categorical::Station.name(),
                rows,
            },
        )?;

        let flag = if data.has_flag() {
            Some(column_mode(data.iter().map(|r| r.flag.as_deref())).ok_or(
                CleanError::InsufficientData {
                    column: Categorical::Flag.name(),
                    rows,
                },
            )?)
        } else {
            None
        };

        Ok(Self {
            levels: WaterLevels::from_fn(|level| means[level.index()]),
            station,
            flag,
        })
    }

    /// Fill value for a level column
    pub fn level_fill(&self, level: Level) -> f64 {
        *self.levels.get(level)
    }

    /// Fill value for the station column
    pub fn station_fill(&self) -> &str {
        &self.station
    }

    /// Fill value for the flag column, if the dataset has one
    pub fn flag_fill(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    /// Fill every missing cell, consuming the raw rows
    pub fn apply(&self, data: RawDataset) -> (CleanDataset, ImputationReport) {
        let has_flag = data.has_flag();
        let mut level_counts = [0usize; 8];
        let mut station_count = 0usize;
        let mut flag_count = 0usize;

        let rows: Vec<CleanObservation> = data
            .into_rows()
            .into_iter()
            .map(|row| {
                let RawObservation {
                    station_id,
                    timestamp,
                    levels,
                    flag,
                } = row;

                let levels = levels.map(|level, value| match value {
                    Some(v) => v,
                    None => {
                        level_counts[level.index()] += 1;
                        self.level_fill(level)
                    }
                });

                let station_id = station_id.unwrap_or_else(|| {
                    station_count += 1;
                    self.station.clone()
                });

                let flag = match (&self.flag, flag) {
                    (Some(_), Some(value)) => Some(value),
                    (Some(fill), None) => {
                        flag_count += 1;
                        Some(fill.clone())
                    }
                    (None, _) => None,
                };

                CleanObservation {
                    station_id,
                    timestamp,
                    levels,
                    flag,
                }
            })
            .collect();

        let mut columns: Vec<ColumnImputation> = Level::ALL
            .iter()
            .map(|&level| ColumnImputation {
                column: level.name().to_string(),
                fill: FillValue::Mean(self.level_fill(level)),
                imputed_cells: level_counts[level.index()],
            })
            .collect();
        columns.push(ColumnImputation {
            column: Categorical::Station.name().to_string(),
            fill: FillValue::Mode(self.station.clone()),
            imputed_cells: station_count,
        });
        if let Some(fill) = &self.flag {
            columns.push(ColumnImputation {
                column: Categorical::Flag.name().to_string(),
                fill: FillValue::Mode(fill.clone()),
                imputed_cells: flag_count,
            });
        }

        for c in &columns {
            debug!("Imputed {} cells of {} with {:?}", c.imputed_cells, c.column, c.fill);
        }

        (CleanDataset::new(rows, has_flag), ImputationReport { columns })
    }
}

/// Impute a dataset in one step
pub fn clean(data: RawDataset) -> Result<(CleanDataset, ImputationReport), CleanError> {
    let stats = ImputationStats::fit(&data)?;
    let (cleaned, report) = stats.apply(data);
    info!(
        "Cleaned {} rows, imputed {} cells",
        cleaned.len(),
        report.total_imputed()
    );
    Ok((cleaned, report))
}

fn column_mean(data: &RawDataset, level: Level) -> Option<f64> {
    let (sum, count) = data
        .present_values(level)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Most frequent value; ties go to the value seen first
fn column_mode<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.enumerate() {
        if let Some(value) = value {
            counts.entry(value).or_insert((0, position)).0 += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
}
