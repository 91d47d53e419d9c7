//! Column Identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measured water level columns, all in feet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Highest recorded water level in the period
    Highest,
    /// Lowest recorded water level in the period
    Lowest,
    /// Mean Higher High Water
    Mhhw,
    /// Mean High Water
    Mhw,
    /// Mean Sea Level
    Msl,
    /// Mean Tide Level
    Mtl,
    /// Mean Low Water
    Mlw,
    /// Mean Lower Low Water
    Mllw,
}

impl Level {
    /// All level columns in file order
    pub const ALL: [Level; 8] = [
        Level::Highest,
        Level::Lowest,
        Level::Mhhw,
        Level::Mhw,
        Level::Msl,
        Level::Mtl,
        Level::Mlw,
        Level::Mllw,
    ];

    /// Position of the level inside [`Level::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Level::Highest => "Highest",
            Level::Lowest => "Lowest",
            Level::Mhhw => "MHHW",
            Level::Mhw => "MHW",
            Level::Msl => "MSL",
            Level::Mtl => "MTL",
            Level::Mlw => "MLW",
            Level::Mllw => "MLLW",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric column of the feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Highest,
    Lowest,
    Mhhw,
    Mhw,
    Msl,
    Mtl,
    Mlw,
    Mllw,
    Month,
    Day,
    Year,
    SinHour,
    CosHour,
}

impl Column {
    /// Every numeric column, measured levels first then derived features
    pub const ALL: [Column; 13] = [
        Column::Highest,
        Column::Lowest,
        Column::Mhhw,
        Column::Mhw,
        Column::Msl,
        Column::Mtl,
        Column::Mlw,
        Column::Mllw,
        Column::Month,
        Column::Day,
        Column::Year,
        Column::SinHour,
        Column::CosHour,
    ];

    /// Measured level behind this column, if any
    pub fn level(self) -> Option<Level> {
        match self {
            Column::Highest => Some(Level::Highest),
            Column::Lowest => Some(Level::Lowest),
            Column::Mhhw => Some(Level::Mhhw),
            Column::Mhw => Some(Level::Mhw),
            Column::Msl => Some(Level::Msl),
            Column::Mtl => Some(Level::Mtl),
            Column::Mlw => Some(Level::Mlw),
            Column::Mllw => Some(Level::Mllw),
            _ => None,
        }
    }

    /// Whether the column is produced by feature derivation
    pub fn is_derived(self) -> bool {
        self.level().is_none()
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Column::Month => "Month",
            Column::Day => "Day",
            Column::Year => "Year",
            Column::SinHour => "Sin_Hour",
            Column::CosHour => "Cos_Hour",
            other => other.level().map(Level::name).unwrap_or_default(),
        }
    }
}

impl From<Level> for Column {
    fn from(level: Level) -> Self {
        match level {
            Level::Highest => Column::Highest,
            Level::Lowest => Column::Lowest,
            Level::Mhhw => Column::Mhhw,
            Level::Mhw => Column::Mhw,
            Level::Msl => Column::Msl,
            Level::Mtl => Column::Mtl,
            Level::Mlw => Column::Mlw,
            Level::Mllw => Column::Mllw,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical (text) columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Categorical {
    /// Station identifier
    Station,
    /// Optional informational flag
    Flag,
}

impl Categorical {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Categorical::Station => "station_id",
            Categorical::Flag => "Inf",
        }
    }
}

impl fmt::Display for Categorical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trips_through_column() {
        for level in Level::ALL {
            assert_eq!(Column::from(level).level(), Some(level));
        }
    }

    #[test]
    fn test_level_index_matches_position() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_derived_columns() {
        let derived: Vec<_> = Column::ALL.iter().filter(|c| c.is_derived()).collect();
        assert_eq!(derived.len(), 5);
        assert_eq!(Column::SinHour.name(), "Sin_Hour");
        assert_eq!(Column::Mllw.name(), "MLLW");
    }

    #[test]
    fn test_config_names() {
        let column: Column = serde_json::from_str("\"sin_hour\"").unwrap();
        assert_eq!(column, Column::SinHour);
        let level: Level = serde_json::from_str("\"mhhw\"").unwrap();
        assert_eq!(level, Level::Mhhw);
    }
}
