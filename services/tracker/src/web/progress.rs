//! services/tracker/src/web/progress.rs
//!
//! Daily study-hours log for the current session's owner.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form,
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use study_core::domain::{NewProgressEntry, Session};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::{
    forms,
    state::AppState,
    views::{render, render_with_status, ProgressPage},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressForm {
    pub hours_studied: Option<String>,
}

pub async fn progress_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.db.get_progress(&session.progress_owner()).await?;
    render(&ProgressPage::new(&entries, None)?)
}

/// POST /progress-tracking - Record hours studied today
#[utoipa::path(
    post,
    path = "/progress-tracking",
    request_body(content = ProgressForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Entry recorded, updated series rendered"),
        (status = 422, description = "Invalid hours, form shown again with a message")
    )
)]
pub async fn progress_post(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Form(form): Form<ProgressForm>,
) -> Result<Response, ApiError> {
    let owner = session.progress_owner();

    let hours = match forms::hours(form.hours_studied.as_deref()) {
        Ok(hours) => hours,
        Err(message) => {
            let entries = state.db.get_progress(&owner).await?;
            let page = ProgressPage::new(&entries, Some(message))?;
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response());
        }
    };

    state
        .db
        .append_progress(NewProgressEntry {
            owner: owner.clone(),
            date: Local::now().date_naive(),
            hours,
        })
        .await?;

    let entries = state.db.get_progress(&owner).await?;
    Ok(render(&ProgressPage::new(&entries, None)?)?.into_response())
}
