//! services/tracker/src/web/views.rs
//!
//! Askama view models. Handlers build these from domain values and render them
//! through `render`; templates live in `services/tracker/templates`.

use askama::Template;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;
use study_core::catalog::CatalogItem;
use study_core::domain::{ProgressEntry, Reminder, StudyPlan};

use crate::error::ApiError;

pub fn render<T: Template>(view: &T) -> Result<Html<String>, ApiError> {
    Ok(Html(view.render()?))
}

/// Renders a form again with a non-200 status, e.g. after a validation failure.
pub fn render_with_status<T: Template>(
    status: StatusCode,
    view: &T,
) -> Result<(StatusCode, Html<String>), ApiError> {
    Ok((status, render(view)?))
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub app_name: &'static str,
}

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
}

#[derive(Template, Default)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub warning: Option<String>,
    pub name: String,
}

pub struct PlanRow {
    pub subject: String,
    pub hours_per_day: u32,
    pub start_date: String,
    pub end_date: String,
}

impl From<&StudyPlan> for PlanRow {
    fn from(plan: &StudyPlan) -> Self {
        Self {
            subject: plan.subject.clone(),
            hours_per_day: plan.hours_per_day,
            start_date: plan.start_date.format("%Y-%m-%d").to_string(),
            end_date: plan
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "open-ended".to_string()),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub name: String,
    pub is_guest: bool,
    pub plans: Vec<PlanRow>,
    pub notice: Option<String>,
}

pub struct Recommendation {
    /// Subject after spelling correction.
    pub subject: String,
    pub suggestion: &'static str,
}

#[derive(Template, Default)]
#[template(path = "study_plan.html")]
pub struct StudyPlanPage {
    pub error: Option<String>,
    pub recommendation: Option<Recommendation>,
}

/// Echoes a validated performance form back with its advisory text.
pub struct PerformancePreview {
    pub subject: String,
    pub hours: u32,
    pub start_date: String,
    pub end_date: String,
    pub suggestion: String,
}

#[derive(Template, Default)]
#[template(path = "performance_input.html")]
pub struct PerformancePage {
    pub error: Option<String>,
    pub preview: Option<PerformancePreview>,
}

pub struct ReminderRow {
    pub task: String,
    pub date: String,
    pub time: String,
}

impl From<&Reminder> for ReminderRow {
    fn from(reminder: &Reminder) -> Self {
        Self {
            task: reminder.task.clone(),
            date: reminder.date.format("%Y-%m-%d").to_string(),
            time: reminder.time.format("%H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "reminders.html")]
pub struct RemindersPage {
    pub error: Option<String>,
    pub reminders: Vec<ReminderRow>,
}

#[derive(Template)]
#[template(path = "all_reminders.html")]
pub struct AllRemindersPage {
    pub reminders: Vec<ReminderRow>,
}

/// The chart's data series, serialized into the page as JSON.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ProgressSeries {
    pub dates: Vec<String>,
    pub hours: Vec<u32>,
}

impl ProgressSeries {
    pub fn from_entries(entries: &[ProgressEntry]) -> Self {
        Self {
            dates: entries
                .iter()
                .map(|e| e.date.format("%Y-%m-%d").to_string())
                .collect(),
            hours: entries.iter().map(|e| e.hours).collect(),
        }
    }
}

pub struct ProgressRow {
    pub date: String,
    pub hours: u32,
}

#[derive(Template)]
#[template(path = "progress_tracking.html")]
pub struct ProgressPage {
    pub error: Option<String>,
    pub rows: Vec<ProgressRow>,
    pub series_json: String,
}

impl ProgressPage {
    pub fn new(entries: &[ProgressEntry], error: Option<String>) -> Result<Self, ApiError> {
        let series = ProgressSeries::from_entries(entries);
        let series_json = serde_json::to_string(&series)
            .map_err(|e| ApiError::Internal(format!("failed to encode progress series: {}", e)))?;
        let rows = series
            .dates
            .into_iter()
            .zip(series.hours)
            .map(|(date, hours)| ProgressRow { date, hours })
            .collect();
        Ok(Self {
            error,
            rows,
            series_json,
        })
    }
}

#[derive(Template)]
#[template(path = "motivational_tips.html")]
pub struct TipsPage {
    pub tip: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "lookup.html")]
pub struct LookupPage {
    pub heading: &'static str,
    pub action: &'static str,
    pub categories: Vec<String>,
    pub selected: Option<String>,
    pub items: Vec<CatalogItem>,
}
