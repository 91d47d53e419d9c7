//! Sea Level Preprocessing Pipeline
//!
//! Runs the stages in order, once, and hands back an immutable
//! [`PipelineOutput`]:
//!
//! load → clean → derive features → split → fit scaler on train → scale

mod config;
mod error;
mod runner;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use runner::{run, run_reader, PipelineOutput};
