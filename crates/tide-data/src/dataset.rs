//! Ordered Row Collections

use crate::column::{Column, Level};
use crate::observation::{CleanObservation, FeatureRow, RawObservation};
use serde::{Deserialize, Serialize};

/// Rows in file order plus the shape facts every stage needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset<R> {
    rows: Vec<R>,
    /// Whether the source carried a flag column
    has_flag: bool,
}

/// Dataset as loaded from disk
pub type RawDataset = Dataset<RawObservation>;
/// Dataset with every missing cell imputed
pub type CleanDataset = Dataset<CleanObservation>;
/// Dataset with derived features, the pipeline's output table
pub type FeatureTable = Dataset<FeatureRow>;

impl<R> Dataset<R> {
    /// Wrap rows, keeping their order
    pub fn new(rows: Vec<R>, has_flag: bool) -> Self {
        Self { rows, has_flag }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the source carried a flag column
    pub fn has_flag(&self) -> bool {
        self.has_flag
    }

    /// Rows in file order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Iterate rows in file order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Row at a position
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Rows at the given positions, in the order given
    pub fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a R> + 'a {
        indices.iter().filter_map(move |&i| self.rows.get(i))
    }

    /// Consume into the row vector
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<'a, R> IntoIterator for &'a Dataset<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl RawDataset {
    /// Non-missing values of a level column
    pub fn present_values(&self, level: Level) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| *r.levels.get(level))
    }
}

impl FeatureTable {
    /// All values of a numeric column in row order
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(column)).collect()
    }

    /// Values of a numeric column for the given rows
    pub fn column_at(&self, column: Column, indices: &[usize]) -> Vec<f64> {
        self.select(indices).map(|r| r.value(column)).collect()
    }

    /// Distinct station identifiers, sorted
    pub fn stations(&self) -> Vec<&str> {
        let mut stations: Vec<&str> = self.rows.iter().map(|r| r.station_id.as_str()).collect();
        stations.sort_unstable();
        stations.dedup();
        stations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::WaterLevels;
    use chrono::NaiveDate;

    fn row(station: &str, hour: u32, highest: f64) -> FeatureRow {
        FeatureRow {
            station_id: station.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2020, 3, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            levels: WaterLevels {
                highest,
                ..Default::default()
            },
            flag: None,
            month: 3,
            day: 1,
            year: 2020,
            sin_hour: 0.0,
            cos_hour: 1.0,
        }
    }

    #[test]
    fn test_column_access() {
        let table = FeatureTable::new(vec![row("b", 0, 1.0), row("a", 1, 2.0), row("b", 2, 3.0)], false);
        assert_eq!(table.column(Column::Highest), vec![1.0, 2.0, 3.0]);
        assert_eq!(table.column_at(Column::Highest, &[2, 0]), vec![3.0, 1.0]);
        assert_eq!(table.stations(), vec!["a", "b"]);
    }

    #[test]
    fn test_select_skips_out_of_range() {
        let table = FeatureTable::new(vec![row("a", 0, 1.0)], false);
        assert_eq!(table.select(&[0, 5]).count(), 1);
    }

    #[test]
    fn test_present_values() {
        let mut a = RawObservation::default();
        a.levels.msl = Some(1.0);
        let b = RawObservation::default();
        let raw = RawDataset::new(vec![a, b], false);
        assert_eq!(raw.present_values(Level::Msl).collect::<Vec<_>>(), vec![1.0]);
    }
}
