//! Header Schema
//!
//! Resolves the source header to column positions once, so a missing or
//! renamed column is reported before any row is read.

use crate::column::Level;
use thiserror::Error;

/// Errors while resolving a header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required column is absent from the header
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// Two header cells resolve to the same column
    #[error("Column {column} appears more than once (positions {first} and {second})")]
    DuplicateColumn {
        column: &'static str,
        first: usize,
        second: usize,
    },
}

const DATE_ALIASES: &[&str] = &["date"];
const TIME_ALIASES: &[&str] = &["time (gmt)", "time", "time (utc)"];
const STATION_ALIASES: &[&str] = &["station_id", "station", "station id"];
const FLAG_ALIASES: &[&str] = &["inf", "flag", "flags"];

fn level_aliases(level: Level) -> &'static [&'static str] {
    match level {
        Level::Highest => &["highest", "highest (ft)"],
        Level::Lowest => &["lowest", "lowest (ft)"],
        Level::Mhhw => &["mhhw", "mhhw (ft)"],
        Level::Mhw => &["mhw", "mhw (ft)"],
        Level::Msl => &["msl", "msl (ft)"],
        Level::Mtl => &["mtl", "mtl (ft)"],
        Level::Mlw => &["mlw", "mlw (ft)"],
        Level::Mllw => &["mllw", "mllw (ft)"],
    }
}

/// Column positions of a tide gauge file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    date: usize,
    time: usize,
    station: usize,
    levels: [usize; 8],
    flag: Option<usize>,
    width: usize,
}

impl Schema {
    /// Resolve header names to positions
    ///
    /// Names are matched case-insensitively after trimming whitespace and a
    /// leading byte order mark.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = headers.into_iter().map(normalize_header).collect();

        let date = find(&names, "Date", DATE_ALIASES)?.ok_or(SchemaError::MissingColumn("Date"))?;
        let time = find(&names, "Time", TIME_ALIASES)?.ok_or(SchemaError::MissingColumn("Time"))?;
        let station = find(&names, "station_id", STATION_ALIASES)?
            .ok_or(SchemaError::MissingColumn("station_id"))?;

        let mut levels = [0usize; 8];
        for level in Level::ALL {
            levels[level.index()] = find(&names, level.name(), level_aliases(level))?
                .ok_or(SchemaError::MissingColumn(level.name()))?;
        }

        let flag = find(&names, "Inf", FLAG_ALIASES)?;

        Ok(Self {
            date,
            time,
            station,
            levels,
            flag,
            width: names.len(),
        })
    }

    /// Position of the date column
    pub fn date(&self) -> usize {
        self.date
    }

    /// Position of the time column
    pub fn time(&self) -> usize {
        self.time
    }

    /// Position of the station identifier column
    pub fn station(&self) -> usize {
        self.station
    }

    /// Position of a level column
    pub fn level(&self, level: Level) -> usize {
        self.levels[level.index()]
    }

    /// Position of the flag column, if the file has one
    pub fn flag(&self) -> Option<usize> {
        self.flag
    }

    /// Number of header cells
    pub fn width(&self) -> usize {
        self.width
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn find(
    names: &[String],
    column: &'static str,
    aliases: &[&str],
) -> Result<Option<usize>, SchemaError> {
    let mut found: Option<usize> = None;
    for (idx, name) in names.iter().enumerate() {
        if !aliases.contains(&name.as_str()) {
            continue;
        }
        if let Some(first) = found {
            return Err(SchemaError::DuplicateColumn {
                column,
                first,
                second: idx,
            });
        }
        found = Some(idx);
    }
    Ok(found)
}
