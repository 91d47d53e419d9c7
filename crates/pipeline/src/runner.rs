//! Stage Orchestration

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use data_split::{Partition, Partitions, Splitter};
use feature_engine::FeatureDeriver;
use preprocessing::{clean, ImputationReport, ScaledMatrix, StandardScaler};
use std::io::Read;
use tide_data::{FeatureRow, FeatureTable, RawDataset};
use tide_loader::{load_csv, load_reader, LoadReport};
use tracing::info;

/// Everything the pipeline produces, read-only once built
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Cleaned rows with derived features, unscaled
    pub table: FeatureTable,
    pub partitions: Partitions,
    /// Scaler fitted on the training partition
    pub scaler: StandardScaler,
    /// Scaled values of every row, aligned with `table`
    pub scaled: ScaledMatrix,
    pub load_report: LoadReport,
    pub imputation_report: ImputationReport,
}

impl PipelineOutput {
    /// Feature rows of one partition
    pub fn partition_rows(&self, partition: Partition) -> impl Iterator<Item = &FeatureRow> + '_ {
        self.table.select(self.partitions.rows(partition))
    }

    /// Scaled values of one row
    pub fn scaled_row(&self, row: usize) -> Option<&[f64]> {
        self.scaled.rows.get(row).map(Vec::as_slice)
    }
}

/// Run every stage against the configured file
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let splitter = Splitter::new(config.split.clone())?;
    let (raw, load_report) = load_csv(&config.csv_path, &config.loader)?;
    process(raw, load_report, &splitter, config)
}

/// Run every stage against an in-memory source
pub fn run_reader<R: Read>(
    reader: R,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let splitter = Splitter::new(config.split.clone())?;
    let (raw, load_report) = load_reader(reader, &config.loader)?;
    process(raw, load_report, &splitter, config)
}

fn process(
    raw: RawDataset,
    load_report: LoadReport,
    splitter: &Splitter,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let (cleaned, imputation_report) = clean(raw)?;
    let table = FeatureDeriver::new().derive(cleaned)?;
    let partitions = splitter.split_table(&table);
    let scaler = StandardScaler::fit(&table, partitions.train(), &config.scaling)?;
    let scaled = scaler.transform(&table);

    info!(
        "Pipeline complete: {} rows, {} imputed cells, {} scaled columns",
        table.len(),
        imputation_report.total_imputed(),
        scaler.columns().len()
    );

    Ok(PipelineOutput {
        table,
        partitions,
        scaler,
        scaled,
        load_report,
        imputation_report,
    })
}
