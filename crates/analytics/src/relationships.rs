//! Pairwise Relationships
//!
//! Scatter series, correlation matrices and the pair summary shown on the
//! visualization page.

use feature_engine::{pearson, SummaryStatistics};
use serde::Serialize;
use std::collections::BTreeMap;
use tide_data::{Column, FeatureTable};

/// Points of one station in an x/y scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub station: String,
    pub points: Vec<(f64, f64)>,
}

/// `x` against `y`, one series per station in station order
pub fn scatter_by_station(table: &FeatureTable, x: Column, y: Column) -> Vec<ScatterSeries> {
    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in table {
        series
            .entry(row.station_id.as_str())
            .or_default()
            .push((row.value(x), row.value(y)));
    }
    series
        .into_iter()
        .map(|(station, points)| ScatterSeries {
            station: station.to_string(),
            points,
        })
        .collect()
}

/// Symmetric Pearson correlation matrix
///
/// Entries are `None` where a column has zero variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two columns of the matrix
    pub fn get(&self, a: Column, b: Column) -> Option<f64> {
        let i = self.columns.iter().position(|&c| c == a)?;
        let j = self.columns.iter().position(|&c| c == b)?;
        self.values[i][j]
    }
}

/// Pearson correlation between every pair of the given columns
pub fn correlation_matrix(table: &FeatureTable, columns: &[Column]) -> CorrelationMatrix {
    let data: Vec<Vec<f64>> = columns.iter().map(|&c| table.column(c)).collect();
    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&data[i], &data[j]);
            let r = r.is_finite().then_some(r);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Per-column summaries plus their pairwise correlations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSummary {
    pub summaries: Vec<(Column, SummaryStatistics)>,
    pub correlations: CorrelationMatrix,
}

/// Summary statistics and correlations for a column subset
pub fn pair_summary(table: &FeatureTable, columns: &[Column]) -> PairSummary {
    PairSummary {
        summaries: columns
            .iter()
            .map(|&c| (c, SummaryStatistics::compute(&table.column(c))))
            .collect(),
        correlations: correlation_matrix(table, columns),
    }
}
