//! Z-Score Standardization
//!
//! Parameters come from the training rows only and are reused unchanged for
//! every other row.

use crate::error::ScaleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tide_data::{Column, FeatureTable, Level};
use tracing::{debug, info, warn};

/// Relative tolerance under which a standard deviation counts as zero
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Handling of zero-variance columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Abort fitting
    #[default]
    Fail,
    /// Leave the column out of the scaled output
    DropColumn,
}

/// Scaler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerConfig {
    /// Columns to standardize
    pub columns: Vec<Column>,
    /// What to do with a zero-variance column
    pub on_degenerate: DegeneratePolicy,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            columns: Level::ALL.iter().map(|&l| Column::from(l)).collect(),
            on_degenerate: DegeneratePolicy::Fail,
        }
    }
}

impl ScalerConfig {
    /// Drop zero-variance columns instead of failing
    pub fn lenient() -> Self {
        Self {
            on_degenerate: DegeneratePolicy::DropColumn,
            ..Default::default()
        }
    }
}

/// Fitted parameters of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl ScalerParams {
    /// `(x - mean) / std`
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }

    /// Inverse of [`ScalerParams::scale`]
    pub fn unscale(&self, value: f64) -> f64 {
        value * self.std_dev + self.mean
    }
}

/// Standardized values, row-major, one entry per fitted column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledMatrix {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<f64>>,
}

impl ScaledMatrix {
    /// Values of one column in row order
    pub fn column(&self, column: Column) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|&c| c == column)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Standard scaler fitted on a training subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Fitted columns in output order
    columns: Vec<Column>,
    params: BTreeMap<Column, ScalerParams>,
    /// Columns skipped for zero variance
    dropped: Vec<Column>,
    /// Number of rows the scaler was fitted on
    fitted_rows: usize,
}

impl StandardScaler {
    /// Fit per-column mean and standard deviation on the training rows
    pub fn fit(
        table: &FeatureTable,
        train: &[usize],
        config: &ScalerConfig,
    ) -> Result<Self, ScaleError> {
        if train.is_empty() {
            return Err(ScaleError::EmptyTrainingSet);
        }
        if let Some(&index) = train.iter().find(|&&i| i >= table.len()) {
            return Err(ScaleError::RowOutOfRange {
                index,
                len: table.len(),
            });
        }

        let mut columns = Vec::with_capacity(config.columns.len());
        let mut params = BTreeMap::new();
        let mut dropped = Vec::new();

        for &column in &config.columns {
            if params.contains_key(&column) || dropped.contains(&column) {
                continue;
            }

            let values = table.column_at(column, train);
            let fitted = compute_params(&values);
            debug!(
                "Fitted {}: mean={:.4} std={:.4}",
                column, fitted.mean, fitted.std_dev
            );

            if is_degenerate(&fitted) {
                match config.on_degenerate {
                    DegeneratePolicy::Fail => {
                        return Err(ScaleError::DegenerateColumn {
                            column,
                            rows: values.len(),
                            value: fitted.mean,
                        });
                    }
                    DegeneratePolicy::DropColumn => {
                        warn!("Dropping zero-variance column {} from scaling", column);
                        dropped.push(column);
                        continue;
                    }
                }
            }

            columns.push(column);
            params.insert(column, fitted);
        }

        info!(
            "Fitted scaler on {} training rows ({} columns, {} dropped)",
            train.len(),
            columns.len(),
            dropped.len()
        );

        Ok(Self {
            columns,
            params,
            dropped,
            fitted_rows: train.len(),
        })
    }

    /// Fitted columns in output order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns left out for zero variance
    pub fn dropped(&self) -> &[Column] {
        &self.dropped
    }

    /// Number of rows used for fitting
    pub fn fitted_rows(&self) -> usize {
        self.fitted_rows
    }

    /// Fitted parameters of a column
    pub fn params(&self, column: Column) -> Option<&ScalerParams> {
        self.params.get(&column)
    }

    /// Standardize one value
    pub fn transform_value(&self, column: Column, value: f64) -> Result<f64, ScaleError> {
        self.params
            .get(&column)
            .map(|p| p.scale(value))
            .ok_or(ScaleError::NotFitted(column))
    }

    /// Undo standardization of one value
    pub fn inverse_transform_value(&self, column: Column, value: f64) -> Result<f64, ScaleError> {
        self.params
            .get(&column)
            .map(|p| p.unscale(value))
            .ok_or(ScaleError::NotFitted(column))
    }

    /// Standardize every row of the table with the fitted parameters
    pub fn transform(&self, table: &FeatureTable) -> ScaledMatrix {
        let fitted: Vec<(Column, ScalerParams)> = self
            .columns
            .iter()
            .filter_map(|c| self.params.get(c).map(|p| (*c, *p)))
            .collect();

        let rows = table
            .iter()
            .map(|row| {
                fitted
                    .iter()
                    .map(|(column, params)| params.scale(row.value(*column)))
                    .collect()
            })
            .collect();

        ScaledMatrix {
            columns: self.columns.clone(),
            rows,
        }
    }
}

fn compute_params(values: &[f64]) -> ScalerParams {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    ScalerParams {
        mean,
        std_dev: variance.sqrt(),
    }
}

fn is_degenerate(params: &ScalerParams) -> bool {
    params.std_dev <= ZERO_VARIANCE_TOLERANCE * params.mean.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use tide_data::{FeatureRow, WaterLevels};

    fn table(highest: &[f64]) -> FeatureTable {
        let rows = highest
            .iter()
            .enumerate()
            .map(|(i, &h)| FeatureRow {
                station_id: "s".to_string(),
                timestamp: NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                levels: WaterLevels::from_fn(|level| match level {
                    Level::Highest => h,
                    Level::Msl => 3.0,
                    _ => i as f64,
                }),
                flag: None,
                month: 1,
                day: 1,
                year: 2020,
                sin_hour: 0.0,
                cos_hour: 1.0,
            })
            .collect();
        FeatureTable::new(rows, false)
    }

    fn highest_only() -> ScalerConfig {
        ScalerConfig {
            columns: vec![Column::Highest],
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_uses_training_rows_only() {
        let data = table(&[1.0, 3.0, 100.0]);
        let scaler = StandardScaler::fit(&data, &[0, 1], &highest_only()).unwrap();
        let params = scaler.params(Column::Highest).unwrap();
        assert_eq!(params.mean, 2.0);
        assert_eq!(params.std_dev, 1.0);

        let scaled = scaler.transform(&data);
        assert_eq!(scaled.column(Column::Highest).unwrap(), vec![-1.0, 1.0, 98.0]);
    }

    #[test]
    fn test_zero_variance_fails() {
        let data = table(&[1.0, 2.0, 3.0]);
        let config = ScalerConfig::default();
        let err = StandardScaler::fit(&data, &[0, 1, 2], &config).unwrap_err();
        assert!(matches!(
            err,
            ScaleError::DegenerateColumn {
                column: Column::Msl,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_variance_dropped_when_lenient() {
        let data = table(&[1.0, 2.0, 3.0]);
        let scaler = StandardScaler::fit(&data, &[0, 1, 2], &ScalerConfig::lenient()).unwrap();
        assert_eq!(scaler.dropped(), &[Column::Msl]);
        assert!(!scaler.columns().contains(&Column::Msl));
        assert_eq!(scaler.transform(&data).rows[0].len(), 7);
    }

    #[test]
    fn test_empty_training_set() {
        let data = table(&[1.0, 2.0]);
        assert_eq!(
            StandardScaler::fit(&data, &[], &highest_only()).unwrap_err(),
            ScaleError::EmptyTrainingSet
        );
    }

    #[test]
    fn test_out_of_range_training_row() {
        let data = table(&[1.0, 2.0]);
        assert!(matches!(
            StandardScaler::fit(&data, &[0, 7], &highest_only()),
            Err(ScaleError::RowOutOfRange { index: 7, len: 2 })
        ));
    }

    #[test]
    fn test_inverse_transform() {
        let data = table(&[1.0, 5.0]);
        let scaler = StandardScaler::fit(&data, &[0, 1], &highest_only()).unwrap();
        let scaled = scaler.transform_value(Column::Highest, 4.0).unwrap();
        let restored = scaler.inverse_transform_value(Column::Highest, scaled).unwrap();
        assert!((restored - 4.0).abs() < 1e-12);
        assert_eq!(
            scaler.transform_value(Column::Mtl, 1.0).unwrap_err(),
            ScaleError::NotFitted(Column::Mtl)
        );
    }

    proptest! {
        #[test]
        fn test_scaled_training_data_is_standardized(
            values in prop::collection::vec(-50.0f64..50.0, 2..80)
        ) {
            let data = table(&values);
            let train: Vec<usize> = (0..values.len()).collect();
            let fitted = compute_params(&values);
            prop_assume!(fitted.std_dev > 0.1);

            let scaler = StandardScaler::fit(&data, &train, &highest_only()).unwrap();
            let scaled = scaler.transform(&data).column(Column::Highest).unwrap();
            let n = scaled.len() as f64;
            let mean = scaled.iter().sum::<f64>() / n;
            let std = (scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
            prop_assert!(mean.abs() < 1e-6);
            prop_assert!((std - 1.0).abs() < 1e-6);
        }
    }
}
