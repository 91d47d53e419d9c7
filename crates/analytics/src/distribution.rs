//! Distribution Shapes
//!
//! Histogram, box-plot statistics and Gaussian kernel density estimates.

use feature_engine::SummaryStatistics;
use serde::Serialize;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use tide_data::{Column, FeatureTable};

/// Bin count used by the dashboard histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Grid size used by the dashboard density curve
pub const DEFAULT_KDE_POINTS: usize = 200;

/// Whisker reach in interquartile ranges
const WHISKER_IQR: f64 = 1.5;

/// Bandwidths the density grid extends past the data on each side
const KDE_CUT: f64 = 3.0;

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Number of values binned
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Equal-width histogram over the value range
///
/// Non-finite values are skipped. A constant sample is spread over
/// `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Histogram { bins: Vec::new() };
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                count,
            })
            .collect(),
    }
}

/// Box-plot statistics for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub group: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within 1.5 IQR below `q1`
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above `q3`
    pub upper_whisker: f64,
    /// Values beyond the whiskers
    pub outliers: Vec<f64>,
}

impl BoxStats {
    fn compute(group: String, values: &[f64]) -> Self {
        let stats = SummaryStatistics::compute(values);
        let low_fence = stats.q1 - WHISKER_IQR * stats.iqr();
        let high_fence = stats.q3 + WHISKER_IQR * stats.iqr();

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let inside = || sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));

        Self {
            group,
            count: stats.count,
            q1: stats.q1,
            median: stats.median,
            q3: stats.q3,
            lower_whisker: inside().next().unwrap_or(stats.q1),
            upper_whisker: inside().last().unwrap_or(stats.q3),
            outliers: sorted
                .iter()
                .copied()
                .filter(|v| !(low_fence..=high_fence).contains(v))
                .collect(),
        }
    }
}

/// Box-plot statistics of a column per station, ordered by station
pub fn box_by_station(table: &FeatureTable, column: Column) -> Vec<BoxStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in table {
        groups
            .entry(row.station_id.as_str())
            .or_default()
            .push(row.value(column));
    }
    groups
        .into_iter()
        .map(|(station, values)| BoxStats::compute(station.to_string(), &values))
        .collect()
}

/// Gaussian kernel density estimate on an even grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEstimate {
    /// Kernel bandwidth from Scott's rule
    pub bandwidth: f64,
    /// `(x, density)` pairs in ascending `x`
    pub points: Vec<(f64, f64)>,
}

/// Gaussian KDE with Scott's rule bandwidth, `σ · n^(-1/5)`
///
/// `σ` is the sample standard deviation. The grid spans three bandwidths
/// beyond the data on each side. Returns `None` for fewer than two finite
/// values, a constant sample, or fewer than two grid points.
pub fn kernel_density(values: &[f64], grid_points: usize) -> Option<DensityEstimate> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 || grid_points < 2 {
        return None;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let sample_var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let bandwidth = sample_var.sqrt() * n.powf(-0.2);
    if !(bandwidth > 0.0) {
        return None;
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min) - KDE_CUT * bandwidth;
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max) + KDE_CUT * bandwidth;
    let step = (max - min) / (grid_points - 1) as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());

    let points = (0..grid_points)
        .map(|i| {
            let x = min + step * i as f64;
            let density = finite
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect();

    Some(DensityEstimate { bandwidth, points })
}
