//! Pipeline Configuration

use data_split::SplitConfig;
use preprocessing::ScalerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tide_loader::LoaderConfig;

/// Settings for every stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Station file to load
    pub csv_path: PathBuf,
    /// Loader settings, flattened so `missing_tokens` sits at the top level
    #[serde(flatten)]
    pub loader: LoaderConfig,
    pub split: SplitConfig,
    pub scaling: ScalerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("combined_data_5_stations.csv"),
            loader: LoaderConfig::default(),
            split: SplitConfig::default(),
            scaling: ScalerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Default settings for another file
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: path.into(),
            ..Default::default()
        }
    }

    /// Hold out 10% of training rows for validation
    pub fn with_validation(mut self) -> Self {
        self.split.validation_ratio = SplitConfig::with_validation().validation_ratio;
        self
    }

    /// Seeded random split instead of chronological
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.split = SplitConfig {
            validation_ratio: self.split.validation_ratio,
            ..SplitConfig::shuffled(seed)
        };
        self
    }

    /// Drop zero-variance columns from scaling instead of failing
    pub fn lenient_scaling(mut self) -> Self {
        self.scaling = ScalerConfig::lenient();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_split::SplitOrder;
    use tide_loader::InvalidTimestampPolicy;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.split.train_ratio, 0.8);
        assert_eq!(config.loader.invalid_timestamps, InvalidTimestampPolicy::Drop);
        assert_eq!(config.scaling.columns.len(), 8);
    }

    #[test]
    fn test_presets_compose() {
        let config = PipelineConfig::for_file("x.csv").with_validation().shuffled(3);
        assert_eq!(config.csv_path, PathBuf::from("x.csv"));
        assert_eq!(config.split.validation_ratio, 0.1);
        assert_eq!(config.split.order, SplitOrder::Shuffled);
        assert_eq!(config.split.seed, 3);
    }

    #[test]
    fn test_validation_keeps_shuffled_order() {
        let config = PipelineConfig::for_file("x.csv").shuffled(3).with_validation();
        assert_eq!(config.split.validation_ratio, 0.1);
        assert_eq!(config.split.order, SplitOrder::Shuffled);
        assert_eq!(config.split.seed, 3);
    }

    #[test]
    fn test_validation_keeps_train_ratio() {
        let mut config = PipelineConfig::default();
        config.split.train_ratio = 0.7;
        let config = config.with_validation();
        assert_eq!(config.split.train_ratio, 0.7);
        assert_eq!(config.split.validation_ratio, 0.1);
    }
}
