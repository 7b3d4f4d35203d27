//! services/tracker/src/web/lookup.rs
//!
//! Static category lookups: study materials, online classes, internships and
//! question papers. Each page lists the fixed items for the chosen category.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use study_core::catalog::CatalogKind;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::{
    state::AppState,
    views::{render, LookupPage},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupForm {
    pub category: Option<String>,
}

fn heading(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Materials => "Study materials",
        CatalogKind::Classes => "Online classes",
        CatalogKind::Internships => "Internships",
        CatalogKind::Papers => "Question papers",
    }
}

fn action(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Materials => "/study-materials",
        CatalogKind::Classes => "/online-classes",
        CatalogKind::Internships => "/internships",
        CatalogKind::Papers => "/question-papers",
    }
}

fn lookup_page(state: &AppState, kind: CatalogKind, category: Option<&str>) -> LookupPage {
    let selected = category.map(str::trim).filter(|c| !c.is_empty());
    LookupPage {
        heading: heading(kind),
        action: action(kind),
        categories: state
            .catalog
            .categories(kind)
            .into_iter()
            .map(str::to_string)
            .collect(),
        selected: selected.map(str::to_string),
        items: selected
            .map(|c| state.catalog.lookup(kind, c).to_vec())
            .unwrap_or_default(),
    }
}

fn show(state: Arc<AppState>, kind: CatalogKind) -> Result<Html<String>, ApiError> {
    render(&lookup_page(&state, kind, None))
}

fn search(state: Arc<AppState>, kind: CatalogKind, form: LookupForm) -> Result<Html<String>, ApiError> {
    render(&lookup_page(&state, kind, form.category.as_deref()))
}

pub async fn materials_page(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    show(state, CatalogKind::Materials)
}

/// POST /study-materials - List study materials for a category
#[utoipa::path(
    post,
    path = "/study-materials",
    request_body(content = LookupForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Items for the category, empty when unknown"))
)]
pub async fn materials_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, CatalogKind::Materials, form)
}

pub async fn classes_page(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    show(state, CatalogKind::Classes)
}

/// POST /online-classes - List online classes for a category
#[utoipa::path(
    post,
    path = "/online-classes",
    request_body(content = LookupForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Items for the category, empty when unknown"))
)]
pub async fn classes_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, CatalogKind::Classes, form)
}

pub async fn internships_page(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    show(state, CatalogKind::Internships)
}

/// POST /internships - List internships for a category
#[utoipa::path(
    post,
    path = "/internships",
    request_body(content = LookupForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Items for the category, empty when unknown"))
)]
pub async fn internships_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, CatalogKind::Internships, form)
}

pub async fn papers_page(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    show(state, CatalogKind::Papers)
}

/// POST /question-papers - List question papers for a category
#[utoipa::path(
    post,
    path = "/question-papers",
    request_body(content = LookupForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Items for the category, empty when unknown"))
)]
pub async fn papers_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, CatalogKind::Papers, form)
}
