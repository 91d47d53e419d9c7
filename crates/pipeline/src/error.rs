//! Pipeline Error Types

use data_split::SplitError;
use feature_engine::FeatureError;
use preprocessing::{CleanError, ScaleError};
use thiserror::Error;
use tide_loader::LoadError;

/// Any stage failure; the run stops at the first one
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Cleaning failed: {0}")]
    Clean(#[from] CleanError),

    #[error("Feature derivation failed: {0}")]
    Feature(#[from] FeatureError),

    #[error("Splitting failed: {0}")]
    Split(#[from] SplitError),

    #[error("Scaling failed: {0}")]
    Scale(#[from] ScaleError),
}
