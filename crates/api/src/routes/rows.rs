//! Feature Row Routes

use axum::{
    extract::{Query, State},
    Json,
};
use data_split::Partition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tide_data::{Column, FeatureRow};

use crate::error::ApiError;
use crate::AppState;

/// Upper bound on rows per request
pub const MAX_LIMIT: usize = 1000;

/// Query parameters for the rows endpoint
#[derive(Debug, Deserialize)]
pub struct RowsQuery {
    /// `train`, `validation` or `test`; all rows when absent
    pub partition: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

/// One feature row with its scaled values
#[derive(Debug, Serialize)]
pub struct RowRecord {
    pub index: usize,
    pub partition: Option<Partition>,
    pub features: FeatureRow,
    /// Aligned with [`RowsResponse::scaled_columns`]
    pub scaled: Vec<f64>,
}

/// Response for the rows endpoint
#[derive(Debug, Serialize)]
pub struct RowsResponse {
    pub partition: Option<Partition>,
    /// Rows available before paging
    pub total: usize,
    pub offset: usize,
    pub scaled_columns: Vec<Column>,
    pub rows: Vec<RowRecord>,
}

fn parse_partition(name: &str) -> Result<Partition, ApiError> {
    [Partition::Train, Partition::Validation, Partition::Test]
        .into_iter()
        .find(|p| p.name() == name)
        .ok_or_else(|| ApiError::UnknownPartition(name.to_string()))
}

/// Page through feature rows, optionally within one partition
pub async fn get_rows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RowsQuery>,
) -> Result<Json<RowsResponse>, ApiError> {
    let output = &state.output;
    let partition = params.partition.as_deref().map(parse_partition).transpose()?;

    let indices: Vec<usize> = match partition {
        Some(p) => output.partitions.rows(p).to_vec(),
        None => (0..output.table.len()).collect(),
    };

    let rows = indices
        .iter()
        .skip(params.offset)
        .take(params.limit.min(MAX_LIMIT))
        .filter_map(|&index| {
            let features = output.table.get(index)?.clone();
            Some(RowRecord {
                index,
                partition: output.partitions.partition_of(index),
                features,
                scaled: output.scaled_row(index).map(<[f64]>::to_vec).unwrap_or_default(),
            })
        })
        .collect();

    Ok(Json(RowsResponse {
        partition,
        total: indices.len(),
        offset: params.offset,
        scaled_columns: output.scaled.columns.clone(),
        rows,
    }))
}
