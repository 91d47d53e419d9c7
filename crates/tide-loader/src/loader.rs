//! CSV Station File Reader

use crate::error::LoadError;
use crate::timestamp::combine_date_time;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tide_data::{Level, RawDataset, RawObservation, Schema, WaterLevels};
use tracing::{debug, info, warn};

/// What to do with rows whose date and time do not form a valid timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidTimestampPolicy {
    /// Remove the row and count it in the load report
    #[default]
    Drop,
    /// Keep the row with no timestamp; feature derivation will reject it
    Retain,
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Cell values treated as missing in addition to the empty cell
    pub missing_tokens: Vec<String>,
    /// Handling of unparseable date/time combinations
    pub invalid_timestamps: InvalidTimestampPolicy,
    /// Field delimiter
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            missing_tokens: ["NA", "N/A", "NaN", "nan", "null", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            invalid_timestamps: InvalidTimestampPolicy::Drop,
            delimiter: ',',
        }
    }
}

impl LoaderConfig {
    /// Keep rows with invalid timestamps
    pub fn retaining_invalid_timestamps() -> Self {
        Self {
            invalid_timestamps: InvalidTimestampPolicy::Retain,
            ..Default::default()
        }
    }

    fn is_missing(&self, cell: &str) -> bool {
        cell.is_empty() || self.missing_tokens.iter().any(|t| t == cell)
    }
}

/// Summary of a load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows read from the file
    pub rows_read: usize,
    /// Rows in the returned dataset
    pub rows_kept: usize,
    /// Rows whose timestamp could not be parsed
    pub invalid_timestamps: usize,
    /// Rows removed because of an invalid timestamp
    pub rows_dropped: usize,
    /// Whether the file has a flag column
    pub has_flag: bool,
}

/// Load a station file from disk
///
/// The file is opened once and closed when loading finishes or fails.
pub fn load_csv(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<(RawDataset, LoadReport), LoadError> {
    let path = path.as_ref();
    info!("Loading station file {}", path.display());

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    load_reader(file, config).map_err(|err| match err {
        LoadError::Read(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Load station data from any reader
pub fn load_reader<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> Result<(RawDataset, LoadReport), LoadError> {
    let delimiter = u8::try_from(config.delimiter).map_err(|_| {
        LoadError::parse(0, format!("delimiter {:?} is not a single byte", config.delimiter))
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let schema = Schema::from_headers(csv_reader.headers()?.iter())?;
    debug!("Resolved header schema: {:?}", schema);

    let mut rows = Vec::new();
    let mut report = LoadReport {
        has_flag: schema.flag().is_some(),
        ..Default::default()
    };

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        report.rows_read += 1;

        let observation = parse_row(&record, &schema, config, line)?;

        if observation.timestamp.is_none() {
            report.invalid_timestamps += 1;
            if config.invalid_timestamps == InvalidTimestampPolicy::Drop {
                debug!("Dropping line {}: invalid date/time", line);
                report.rows_dropped += 1;
                continue;
            }
        }

        rows.push(observation);
    }

    report.rows_kept = rows.len();
    if report.rows_dropped > 0 {
        warn!(
            "Dropped {} of {} rows with unparseable date/time",
            report.rows_dropped, report.rows_read
        );
    } else if report.invalid_timestamps > 0 {
        warn!(
            "Retained {} rows with unparseable date/time",
            report.invalid_timestamps
        );
    }
    info!(
        "Loaded {} rows ({} read, flag column: {})",
        report.rows_kept, report.rows_read, report.has_flag
    );

    Ok((RawDataset::new(rows, report.has_flag), report))
}

fn parse_row(
    record: &csv::StringRecord,
    schema: &Schema,
    config: &LoaderConfig,
    line: u64,
) -> Result<RawObservation, LoadError> {
    let cell = |idx: usize| record.get(idx).filter(|value| !config.is_missing(value));

    let timestamp = match (cell(schema.date()), cell(schema.time())) {
        (Some(date), Some(time)) => combine_date_time(date, time),
        _ => None,
    };

    let mut levels: WaterLevels<Option<f64>> = WaterLevels::default();
    for level in Level::ALL {
        *levels.get_mut(level) = match cell(schema.level(level)) {
            Some(raw) => Some(parse_number(raw, level, line)?),
            None => None,
        };
    }

    Ok(RawObservation {
        station_id: cell(schema.station()).map(str::to_string),
        timestamp,
        levels,
        flag: schema.flag().and_then(|idx| cell(idx)).map(str::to_string),
    })
}

fn parse_number(raw: &str, level: Level, line: u64) -> Result<f64, LoadError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::parse(
            line,
            format!("column {}: cannot parse {:?} as a finite number", level, raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "Date,Time (GMT),station_id,Highest,MHHW (ft),MHW (ft),MSL (ft),MTL (ft),MLW (ft),MLLW (ft),Lowest (ft),Inf";

    fn load(body: &str, config: &LoaderConfig) -> Result<(RawDataset, LoadReport), LoadError> {
        let text = format!("{}\n{}", HEADER, body);
        load_reader(text.as_bytes(), config)
    }

    #[test]
    fn test_loads_rows_in_file_order() {
        let body = "\
2024-01-15,23:00,1612340,2.1,1.9,1.5,0.8,0.8,0.1,-0.2,-0.5,
2023-06-01,04:00,1611400,2.4,2.0,1.6,0.9,0.9,0.2,-0.1,-0.4,p
";
        let (data, report) = load(body, &LoaderConfig::default()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(report.rows_read, 2);
        assert!(data.has_flag());

        let first = &data.rows()[0];
        assert_eq!(first.station_id.as_deref(), Some("1612340"));
        assert_eq!(first.levels.highest, Some(2.1));
        assert_eq!(first.levels.lowest, Some(-0.5));
        assert_eq!(first.flag, None);
        assert_eq!(data.rows()[1].flag.as_deref(), Some("p"));
    }

    #[test]
    fn test_missing_tokens() {
        let body = "2024-01-15,23:00,NA,,1.9,1.5,NaN,0.8,0.1,-0.2,-,\n";
        let (data, _) = load(body, &LoaderConfig::default()).unwrap();
        let row = &data.rows()[0];
        assert_eq!(row.station_id, None);
        assert_eq!(row.levels.highest, None);
        assert_eq!(row.levels.msl, None);
        assert_eq!(row.levels.lowest, None);
        assert_eq!(row.levels.mhhw, Some(1.9));
    }

    #[test]
    fn test_invalid_timestamp_dropped_by_default() {
        let body = "\
garbage,23:00,1,1,1,1,1,1,1,1,1,
2024-01-15,,1,1,1,1,1,1,1,1,1,
2024-01-15,10:00,1,1,1,1,1,1,1,1,1,
";
        let (data, report) = load(body, &LoaderConfig::default()).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(report.invalid_timestamps, 2);
        assert_eq!(report.rows_dropped, 2);
        assert_eq!(report.rows_kept, 1);
    }

    #[test]
    fn test_invalid_timestamp_retained() {
        let body = "garbage,23:00,1,1,1,1,1,1,1,1,1,\n";
        let (data, report) = load(body, &LoaderConfig::retaining_invalid_timestamps()).unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.rows()[0].timestamp.is_none());
        assert_eq!(report.rows_dropped, 0);
    }

    #[test]
    fn test_column_count_mismatch_is_parse_error() {
        let body = "2024-01-15,23:00,1,1,1,1\n";
        let err = load(body, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_non_numeric_cell_is_parse_error() {
        let body = "2024-01-15,23:00,1,high,1,1,1,1,1,1,1,\n";
        let err = load(body, &LoaderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Highest"));
    }

    #[test]
    fn test_missing_required_column() {
        let text = "Date,Time,station_id,Highest\n2024-01-15,23:00,1,1\n";
        let err = load_reader(text.as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_file_not_found() {
        let err = load_csv("/definitely/not/here.csv", &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(dir.path(), &LoaderConfig::default()).unwrap_err();
        assert!(
            matches!(&err, LoadError::Io { path, .. } if path == dir.path()),
            "{err}"
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_reader_failure_is_read_error() {
        let err = load_reader(FailingReader, &LoaderConfig::default()).unwrap_err();
        assert!(
            matches!(&err, LoadError::Read(e) if e.kind() == io::ErrorKind::BrokenPipe),
            "{err}"
        );
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "2024-01-15,23:00,1612340,2.1,1.9,1.5,0.8,0.8,0.1,-0.2,-0.5,").unwrap();
        file.flush().unwrap();

        let (data, report) = load_csv(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(report.rows_kept, 1);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let text = HEADER.replace(',', ";")
            + "\n2024-01-15;23:00;1612340;2.1;1.9;1.5;0.8;0.8;0.1;-0.2;-0.5;\n";
        let config = LoaderConfig {
            delimiter: ';',
            ..Default::default()
        };
        let (data, _) = load_reader(text.as_bytes(), &config).unwrap();
        assert_eq!(data.rows()[0].levels.mllw, Some(-0.2));
    }
}
