//! Train/Validation/Test Splitter

use crate::error::SplitError;
use crate::partition::Partitions;
use chrono::NaiveDateTime;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tide_data::FeatureTable;
use tracing::{debug, info};

/// Slack subtracted before rounding sizes up, so 100 × 0.3 stays 30
const SIZE_EPSILON: f64 = 1e-9;

/// Row ordering used before cutting partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOrder {
    /// Earliest rows train, latest rows test; ties keep file order
    #[default]
    Chronological,
    /// Seeded shuffle of all rows
    Shuffled,
}

/// Splitter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of rows for training (and validation), in (0, 1)
    pub train_ratio: f64,
    /// Share of the training rows moved to validation, in [0, 1); 0 disables it
    pub validation_ratio: f64,
    /// Row ordering
    pub order: SplitOrder,
    /// Seed for [`SplitOrder::Shuffled`]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            validation_ratio: 0.0,
            order: SplitOrder::Chronological,
            seed: 42,
        }
    }
}

impl SplitConfig {
    /// 80/20 split with 10% of training held out for validation
    pub fn with_validation() -> Self {
        Self {
            validation_ratio: 0.1,
            ..Default::default()
        }
    }

    /// Seeded random 80/20 split
    pub fn shuffled(seed: u64) -> Self {
        Self {
            order: SplitOrder::Shuffled,
            seed,
            ..Default::default()
        }
    }
}

/// Partitions rows without replacement
#[derive(Debug, Clone)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Create a splitter, validating the ratios
    pub fn new(config: SplitConfig) -> Result<Self, SplitError> {
        if !(config.train_ratio > 0.0 && config.train_ratio < 1.0) {
            return Err(SplitError::InvalidRatio {
                name: "train_ratio",
                range: "(0, 1)",
                value: config.train_ratio,
            });
        }
        if !(config.validation_ratio >= 0.0 && config.validation_ratio < 1.0) {
            return Err(SplitError::InvalidRatio {
                name: "validation_ratio",
                range: "[0, 1)",
                value: config.validation_ratio,
            });
        }
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split the rows of a feature table
    pub fn split_table(&self, table: &FeatureTable) -> Partitions {
        let timestamps: Vec<NaiveDateTime> = table.iter().map(|r| r.timestamp).collect();
        self.split(&timestamps)
    }

    /// Split rows given their timestamps
    ///
    /// Partition row lists come out in the order rows were cut: timestamp
    /// order for chronological splits, shuffle order otherwise.
    pub fn split(&self, timestamps: &[NaiveDateTime]) -> Partitions {
        let n = timestamps.len();
        let mut order: Vec<usize> = (0..n).collect();

        match self.config.order {
            SplitOrder::Chronological => order.sort_by_key(|&i| timestamps[i]),
            SplitOrder::Shuffled => {
                let mut rng = StdRng::seed_from_u64(self.config.seed);
                order.shuffle(&mut rng);
            }
        }

        let n_test = ceil_share(n, 1.0 - self.config.train_ratio);
        let n_train_total = n - n_test;
        let n_validation = if self.config.validation_ratio > 0.0 {
            ceil_share(n_train_total, self.config.validation_ratio)
        } else {
            0
        };
        let n_train = n_train_total - n_validation;

        let test = order.split_off(n_train_total);
        let validation = order.split_off(n_train);
        let train = order;

        debug!(
            "Split order {:?}: train={} validation={} test={}",
            self.config.order,
            train.len(),
            validation.len(),
            test.len()
        );
        info!(
            "Partitioned {} rows into {} train / {} validation / {} test",
            n,
            train.len(),
            validation.len(),
            test.len()
        );

        Partitions::new(train, validation, test)
    }
}

fn ceil_share(n: usize, ratio: f64) -> usize {
    let size = (n as f64 * ratio - SIZE_EPSILON).ceil().max(0.0) as usize;
    size.min(n)
}
