//! Pipeline Summary Route

use axum::{extract::State, Json};
use preprocessing::ImputationReport;
use serde::Serialize;
use std::sync::Arc;
use tide_data::Column;
use tide_loader::LoadReport;

use crate::AppState;

/// Partition sizes
#[derive(Debug, Serialize)]
pub struct PartitionSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

/// Fitted parameters of one column
#[derive(Debug, Serialize)]
pub struct ScaledColumn {
    pub column: Column,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Serialize)]
pub struct ScalerSummary {
    pub fitted_rows: usize,
    pub columns: Vec<ScaledColumn>,
    pub dropped: Vec<Column>,
}

/// Response for the summary endpoint
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub rows: usize,
    pub stations: Vec<String>,
    pub load_report: LoadReport,
    pub imputation_report: ImputationReport,
    pub partitions: PartitionSizes,
    pub scaler: ScalerSummary,
}

/// Report what the pipeline did
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let output = &state.output;
    let scaler = &output.scaler;

    Json(SummaryResponse {
        rows: output.table.len(),
        stations: output.table.stations().into_iter().map(String::from).collect(),
        load_report: output.load_report.clone(),
        imputation_report: output.imputation_report.clone(),
        partitions: PartitionSizes {
            train: output.partitions.train().len(),
            validation: output.partitions.validation().len(),
            test: output.partitions.test().len(),
        },
        scaler: ScalerSummary {
            fitted_rows: scaler.fitted_rows(),
            columns: scaler
                .columns()
                .iter()
                .filter_map(|&column| {
                    scaler.params(column).map(|p| ScaledColumn {
                        column,
                        mean: p.mean,
                        std_dev: p.std_dev,
                    })
                })
                .collect(),
            dropped: scaler.dropped().to_vec(),
        },
    })
}
