//! services/tracker/src/web/study.rs
//!
//! The study-plan recommendation page and the performance-input flow
//! (preview, then confirm to persist a `StudyPlan`).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use study_core::advice::{advise, recommend};
use study_core::domain::{NewStudyPlan, Session};
use study_core::spelling::correct_spelling;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::{
    forms,
    pages::Notice,
    state::AppState,
    views::{
        render, render_with_status, PerformancePage, PerformancePreview, Recommendation,
        StudyPlanPage,
    },
};

//=========================================================================================
// Study Plan Recommendation
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudyPlanForm {
    pub subject: Option<String>,
    pub hours: Option<String>,
}

pub async fn study_plan_page() -> Result<impl IntoResponse, ApiError> {
    render(&StudyPlanPage::default())
}

/// POST /study-plan - Recommend a study routine for a subject
#[utoipa::path(
    post,
    path = "/study-plan",
    request_body(content = StudyPlanForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Recommendation rendered"),
        (status = 422, description = "Invalid input, form shown again with a message")
    )
)]
pub async fn study_plan_post(Form(form): Form<StudyPlanForm>) -> Result<Response, ApiError> {
    let input = forms::required(form.subject.as_deref(), "Subject")
        .and_then(|subject| Ok((subject, forms::hours(form.hours.as_deref())?)));

    match input {
        Ok((subject, hours)) => {
            let page = StudyPlanPage {
                error: None,
                recommendation: Some(Recommendation {
                    subject: correct_spelling(subject),
                    suggestion: recommend(hours),
                }),
            };
            Ok(render(&page)?.into_response())
        }
        Err(message) => {
            let page = StudyPlanPage {
                error: Some(message),
                recommendation: None,
            };
            Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response())
        }
    }
}

//=========================================================================================
// Performance Input
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct PerformanceForm {
    pub subject: Option<String>,
    pub hours: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Present (any non-empty value) once the user has seen the preview.
    pub confirm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceInput {
    pub subject: String,
    pub hours: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PerformanceForm {
    pub fn validate(&self) -> Result<PerformanceInput, String> {
        let subject = forms::required(self.subject.as_deref(), "Subject")?;
        let hours = forms::hours(self.hours.as_deref())?;
        let start_date = forms::date(
            forms::required(self.start_date.as_deref(), "Start date")?,
            "Start date",
        )?;
        let end_date = forms::optional(self.end_date.as_deref())
            .map(|raw| forms::date(raw, "End date"))
            .transpose()?;

        if matches!(end_date, Some(end) if end < start_date) {
            return Err("End date cannot be before the start date.".to_string());
        }

        Ok(PerformanceInput {
            subject: subject.to_string(),
            hours,
            start_date,
            end_date,
        })
    }

    fn is_confirmed(&self) -> bool {
        forms::optional(self.confirm.as_deref()).is_some()
    }
}

pub async fn performance_page() -> Result<impl IntoResponse, ApiError> {
    render(&PerformancePage::default())
}

/// POST /performance-input - Preview advice, or confirm and save a study plan
#[utoipa::path(
    post,
    path = "/performance-input",
    request_body(content = PerformanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Advice preview with a confirmation control"),
        (status = 303, description = "Plan saved, or guest redirected with a warning"),
        (status = 422, description = "Invalid input, form shown again with a message")
    )
)]
#[instrument(name = "Web: Performance input", skip(state, session, form), fields(session_guest = session.is_guest))]
pub async fn performance_post(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Form(form): Form<PerformanceForm>,
) -> Result<Response, ApiError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            let page = PerformancePage {
                error: Some(message),
                preview: None,
            };
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response());
        }
    };

    if !form.is_confirmed() {
        let page = PerformancePage {
            error: None,
            preview: Some(PerformancePreview {
                suggestion: advise(&input.subject, i64::from(input.hours)),
                subject: input.subject,
                hours: input.hours,
                start_date: input.start_date.format("%Y-%m-%d").to_string(),
                end_date: input
                    .end_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            }),
        };
        return Ok(render(&page)?.into_response());
    }

    let user_id = match session.user_id {
        Some(user_id) if session.can_write_plans() => user_id,
        _ => {
            warn!("Guest session attempted to save a study plan");
            return Ok(Redirect::to(&Notice::GuestCannotSavePlan.dashboard_url()).into_response());
        }
    };

    let plan = state
        .db
        .create_study_plan(NewStudyPlan {
            user_id,
            subject: input.subject,
            hours_per_day: input.hours,
            start_date: input.start_date,
            end_date: input.end_date,
        })
        .await?;
    info!("Saved study plan {} for user {}", plan.id, user_id);

    Ok(Redirect::to(&Notice::PlanSaved.dashboard_url()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(hours: &str, start: &str, end: &str) -> PerformanceForm {
        PerformanceForm {
            subject: Some("Physics".into()),
            hours: Some(hours.into()),
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            confirm: None,
        }
    }

    #[test]
    fn blank_end_date_means_open_ended() {
        let input = form("2", "2025-01-01", "").validate().unwrap();
        assert_eq!(input.end_date, None);
        assert_eq!(input.hours, 2);
    }

    #[test]
    fn start_date_is_required() {
        let err = form("2", " ", "").validate().unwrap_err();
        assert_eq!(err, "Start date is required.");
    }

    #[test]
    fn end_date_cannot_precede_start() {
        let err = form("2", "2025-02-01", "2025-01-01").validate().unwrap_err();
        assert!(err.contains("before the start date"));
    }

    #[test]
    fn hours_are_validated_before_dates() {
        let err = form("lots", "not a date", "").validate().unwrap_err();
        assert_eq!(err, forms::INVALID_HOURS);
    }
}
