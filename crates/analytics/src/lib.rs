//! Dashboard Aggregations
//!
//! Every chart on the dashboard is backed by one function here. Grouping is
//! done with ordered maps, so results never depend on row order.

mod distribution;
mod grouping;
mod relationships;

pub use distribution::{
    box_by_station, histogram, kernel_density, BoxStats, DensityEstimate, Histogram, HistogramBin,
    DEFAULT_HISTOGRAM_BINS, DEFAULT_KDE_POINTS,
};
pub use grouping::{
    mean_by_calendar_month, mean_share_by_station, monthly_mean, station_counts, yearly_mean,
    CalendarMonthMean, MonthlyMean, StationCount, StationShare, YearlyMean,
};
pub use relationships::{
    correlation_matrix, pair_summary, scatter_by_station, CorrelationMatrix, PairSummary,
    ScatterSeries,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use feature_engine::cyclical_hour;
    use tide_data::{FeatureRow, FeatureTable, WaterLevels};

    /// Row with the given station, date and hour; every level set to `level`
    pub fn row(station: &str, ymd: (i32, u32, u32), hour: u32, level: f64) -> FeatureRow {
        let (sin_hour, cos_hour) = cyclical_hour(hour);
        FeatureRow {
            station_id: station.to_string(),
            timestamp: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            levels: WaterLevels::from_fn(|_| level),
            flag: None,
            month: ymd.1,
            day: ymd.2,
            year: ymd.0,
            sin_hour,
            cos_hour,
        }
    }

    pub fn table(rows: Vec<FeatureRow>) -> FeatureTable {
        FeatureTable::new(rows, false)
    }
}
