//! Section and Page Routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::navigation::{ModelPage, NavigationState, Section};
use crate::pages::{render, Page};
use crate::AppState;

/// Query parameters for the page endpoint
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Sub-page slug, models section only
    pub model_page: Option<String>,
}

/// Menu entry
#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub model_pages: Vec<ModelPageEntry>,
}

/// Sub-page menu entry
#[derive(Debug, Serialize)]
pub struct ModelPageEntry {
    pub slug: &'static str,
    pub title: &'static str,
}

/// List sections in menu order
pub async fn get_sections() -> Json<Vec<SectionEntry>> {
    let sections = Section::ALL
        .into_iter()
        .map(|section| SectionEntry {
            slug: section.slug(),
            title: section.title(),
            model_pages: if section == Section::Models {
                ModelPage::ALL
                    .into_iter()
                    .map(|page| ModelPageEntry {
                        slug: page.slug(),
                        title: page.title(),
                    })
                    .collect()
            } else {
                Vec::new()
            },
        })
        .collect();
    Json(sections)
}

/// Render one page
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page>, ApiError> {
    let nav = NavigationState::from_slugs(&section, params.model_page.as_deref())?;
    Ok(Json(render(&nav, &state.output)))
}
