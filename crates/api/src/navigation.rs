//! Dashboard Navigation
//!
//! The selected section and model sub-page are plain values handed to the
//! renderer. Nothing here is global.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Top-level dashboard section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Introduction,
    DataCollection,
    Visualizations,
    Models,
    Conclusion,
}

impl Section {
    /// Sections in menu order
    pub const ALL: [Section; 5] = [
        Section::Introduction,
        Section::DataCollection,
        Section::Visualizations,
        Section::Models,
        Section::Conclusion,
    ];

    /// Menu label
    pub fn title(self) -> &'static str {
        match self {
            Section::Introduction => "Introduction",
            Section::DataCollection => "Data Collection and Cleaning",
            Section::Visualizations => "Data Visualizations",
            Section::Models => "Models Implemented",
            Section::Conclusion => "Conclusion",
        }
    }

    /// URL path segment
    pub fn slug(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::DataCollection => "data_collection",
            Section::Visualizations => "visualizations",
            Section::Models => "models",
            Section::Conclusion => "conclusion",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

/// Sub-page of the models section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPage {
    #[default]
    Overview,
    HighestTidalLevel,
    MeanSeaLevel,
    #[serde(rename = "seasonal_temporal_analysis")]
    SeasonalTemporal,
}

impl ModelPage {
    pub const ALL: [ModelPage; 4] = [
        ModelPage::Overview,
        ModelPage::HighestTidalLevel,
        ModelPage::MeanSeaLevel,
        ModelPage::SeasonalTemporal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ModelPage::Overview => "Models Implemented",
            ModelPage::HighestTidalLevel => "Highest Tidal Level Prediction",
            ModelPage::MeanSeaLevel => "Mean Sea Level Prediction",
            ModelPage::SeasonalTemporal => "Seasonal & Temporal Analysis",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ModelPage::Overview => "overview",
            ModelPage::HighestTidalLevel => "highest_tidal_level",
            ModelPage::MeanSeaLevel => "mean_sea_level",
            ModelPage::SeasonalTemporal => "seasonal_temporal_analysis",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

/// What the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub section: Section,
    /// Only meaningful for [`Section::Models`]
    pub model_page: ModelPage,
}

impl NavigationState {
    /// Open a section at its default sub-page
    pub fn new(section: Section) -> Self {
        Self {
            section,
            model_page: ModelPage::default(),
        }
    }

    /// Open a model sub-page
    pub fn model(page: ModelPage) -> Self {
        Self {
            section: Section::Models,
            model_page: page,
        }
    }

    /// Resolve URL segments
    ///
    /// A sub-page is only accepted for the models section.
    pub fn from_slugs(section: &str, model_page: Option<&str>) -> Result<Self, ApiError> {
        let section =
            Section::from_slug(section).ok_or_else(|| ApiError::UnknownSection(section.to_string()))?;
        match (section, model_page) {
            (_, None) => Ok(Self::new(section)),
            (Section::Models, Some(slug)) => ModelPage::from_slug(slug)
                .map(Self::model)
                .ok_or_else(|| ApiError::UnknownModelPage(slug.to_string())),
            (_, Some(slug)) => Err(ApiError::UnknownModelPage(slug.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_slug(section.slug()), Some(section));
        }
        for page in ModelPage::ALL {
            assert_eq!(ModelPage::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Section::from_slug("Introduction"), None);
    }

    #[test]
    fn test_from_slugs() {
        let nav = NavigationState::from_slugs("models", Some("mean_sea_level")).unwrap();
        assert_eq!(nav, NavigationState::model(ModelPage::MeanSeaLevel));

        let nav = NavigationState::from_slugs("conclusion", None).unwrap();
        assert_eq!(nav.section, Section::Conclusion);
        assert_eq!(nav.model_page, ModelPage::Overview);
    }

    #[test]
    fn test_unknown_targets() {
        assert!(matches!(
            NavigationState::from_slugs("weather", None),
            Err(ApiError::UnknownSection(s)) if s == "weather"
        ));
        assert!(matches!(
            NavigationState::from_slugs("models", Some("tsunami")),
            Err(ApiError::UnknownModelPage(_))
        ));
        assert!(matches!(
            NavigationState::from_slugs("introduction", Some("overview")),
            Err(ApiError::UnknownModelPage(_))
        ));
    }
}
