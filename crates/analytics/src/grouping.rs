//! Group-By Means and Counts

use serde::Serialize;
use std::collections::BTreeMap;
use tide_data::{Column, FeatureRow, FeatureTable};
use tracing::debug;

/// Mean of a column for one (year, month)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: u32,
    /// First day of the month, `YYYY-MM-01`
    pub label: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean of a column for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMean {
    pub year: i32,
    pub mean: f64,
    pub count: usize,
}

/// Mean of a column for one calendar month across all years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonthMean {
    pub month: u32,
    pub mean: f64,
    pub count: usize,
}

/// Number of observations of a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCount {
    pub station: String,
    pub count: usize,
}

/// A station's share of the summed per-station means
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationShare {
    pub station: String,
    pub mean: f64,
    /// Percentage of the total, all shares sum to 100
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn group_by<K: Ord>(
    table: &FeatureTable,
    column: Column,
    key: impl Fn(&FeatureRow) -> K,
) -> BTreeMap<K, Accumulator> {
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for row in table {
        groups.entry(key(row)).or_default().push(row.value(column));
    }
    groups
}

/// Mean of a column per (year, month), chronological
pub fn monthly_mean(table: &FeatureTable, column: Column) -> Vec<MonthlyMean> {
    let groups = group_by(table, column, |r| (r.year, r.month));
    debug!("{} monthly groups for {}", groups.len(), column);
    groups
        .into_iter()
        .map(|((year, month), acc)| MonthlyMean {
            year,
            month,
            label: format!("{:04}-{:02}-01", year, month),
            mean: acc.mean(),
            count: acc.count,
        })
        .collect()
}

/// Mean of a column per year, chronological
pub fn yearly_mean(table: &FeatureTable, column: Column) -> Vec<YearlyMean> {
    group_by(table, column, |r| r.year)
        .into_iter()
        .map(|(year, acc)| YearlyMean {
            year,
            mean: acc.mean(),
            count: acc.count,
        })
        .collect()
}

/// Mean of a column per calendar month (1-12), pooling years
pub fn mean_by_calendar_month(table: &FeatureTable, column: Column) -> Vec<CalendarMonthMean> {
    group_by(table, column, |r| r.month)
        .into_iter()
        .map(|(month, acc)| CalendarMonthMean {
            month,
            mean: acc.mean(),
            count: acc.count,
        })
        .collect()
}

/// Observation count per station, most observed first
///
/// Equal counts are ordered by station identifier.
pub fn station_counts(table: &FeatureTable) -> Vec<StationCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in table {
        *counts.entry(row.station_id.as_str()).or_default() += 1;
    }
    let mut counts: Vec<StationCount> = counts
        .into_iter()
        .map(|(station, count)| StationCount {
            station: station.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.station.cmp(&b.station)));
    counts
}

/// Each station's share of the sum of per-station means
///
/// Returns an empty list when the means sum to zero.
pub fn mean_share_by_station(table: &FeatureTable, column: Column) -> Vec<StationShare> {
    let groups = group_by(table, column, |r| r.station_id.clone());
    let total: f64 = groups.values().map(Accumulator::mean).sum();
    if total == 0.0 || !total.is_finite() {
        return Vec::new();
    }
    groups
        .into_iter()
        .map(|(station, acc)| StationShare {
            station,
            mean: acc.mean(),
            percent: 100.0 * acc.mean() / total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{row, table};

    #[test]
    fn test_monthly_mean_ignores_row_order() {
        let data = table(vec![
            row("a", (2021, 2, 3), 0, 4.0),
            row("a", (2020, 12, 1), 0, 1.0),
            row("b", (2021, 2, 20), 5, 2.0),
            row("b", (2020, 12, 9), 7, 3.0),
        ]);
        let means = monthly_mean(&data, Column::Highest);
        assert_eq!(means.len(), 2);
        assert_eq!((means[0].year, means[0].month), (2020, 12));
        assert_eq!(means[0].mean, 2.0);
        assert_eq!(means[0].label, "2020-12-01");
        assert_eq!(means[1].mean, 3.0);
        assert_eq!(means[1].count, 2);
    }

    #[test]
    fn test_yearly_and_calendar_month() {
        let data = table(vec![
            row("a", (2020, 1, 1), 0, 1.0),
            row("a", (2021, 1, 1), 0, 3.0),
            row("a", (2021, 7, 1), 0, 5.0),
        ]);
        let yearly = yearly_mean(&data, Column::Msl);
        assert_eq!(yearly[1].year, 2021);
        assert_eq!(yearly[1].mean, 4.0);

        let seasonal = mean_by_calendar_month(&data, Column::Highest);
        assert_eq!(seasonal.len(), 2);
        assert_eq!(seasonal[0].month, 1);
        assert_eq!(seasonal[0].mean, 2.0);
    }

    #[test]
    fn test_station_counts_descending() {
        let data = table(vec![
            row("b", (2020, 1, 1), 0, 1.0),
            row("a", (2020, 1, 1), 0, 1.0),
            row("c", (2020, 1, 1), 0, 1.0),
            row("c", (2020, 1, 2), 0, 1.0),
        ]);
        let counts = station_counts(&data);
        assert_eq!(counts[0], StationCount { station: "c".into(), count: 2 });
        assert_eq!(counts[1].station, "a");
        assert_eq!(counts[2].station, "b");
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let data = table(vec![
            row("a", (2020, 1, 1), 0, 1.0),
            row("a", (2020, 1, 2), 0, 3.0),
            row("b", (2020, 1, 1), 0, 6.0),
        ]);
        let shares = mean_share_by_station(&data, Column::Mtl);
        assert_eq!(shares.len(), 2);
        assert!((shares[0].percent - 25.0).abs() < 1e-12);
        assert!((shares.iter().map(|s| s.percent).sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_empty_when_total_is_zero() {
        let data = table(vec![row("a", (2020, 1, 1), 0, 0.0)]);
        assert!(mean_share_by_station(&data, Column::Mtl).is_empty());
    }
}
