//! services/tracker/src/web/reminders.rs
//!
//! Global reminders: a create form with the current list, and a list-only page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use study_core::domain::NewReminder;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::{
    forms,
    state::AppState,
    views::{render, render_with_status, AllRemindersPage, ReminderRow, RemindersPage},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReminderForm {
    pub task: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`, 24 hour clock
    pub time: Option<String>,
}

impl ReminderForm {
    pub fn validate(&self) -> Result<NewReminder, String> {
        let task = forms::required(self.task.as_deref(), "Task")?;
        let date = forms::date(forms::required(self.date.as_deref(), "Date")?, "Date")?;
        let time = forms::time(forms::required(self.time.as_deref(), "Time")?, "Time")?;
        Ok(NewReminder {
            task: task.to_string(),
            date,
            time,
        })
    }
}

async fn reminder_rows(state: &AppState) -> Result<Vec<ReminderRow>, ApiError> {
    let reminders = state.db.list_reminders().await?;
    Ok(reminders.iter().map(ReminderRow::from).collect())
}

pub async fn reminders_page(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let page = RemindersPage {
        error: None,
        reminders: reminder_rows(&state).await?,
    };
    render(&page)
}

/// POST /reminders - Create a reminder
#[utoipa::path(
    post,
    path = "/reminders",
    request_body(content = ReminderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Reminder saved, redirected back to the list"),
        (status = 422, description = "Invalid input, form shown again with a message")
    )
)]
pub async fn reminders_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReminderForm>,
) -> Result<Response, ApiError> {
    let reminder = match form.validate() {
        Ok(reminder) => reminder,
        Err(message) => {
            let page = RemindersPage {
                error: Some(message),
                reminders: reminder_rows(&state).await?,
            };
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response());
        }
    };

    let saved = state.db.create_reminder(reminder).await?;
    info!("Created reminder {}", saved.id);
    Ok(Redirect::to("/reminders").into_response())
}

pub async fn all_reminders_page(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let page = AllRemindersPage {
        reminders: reminder_rows(&state).await?,
    };
    render(&page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_required() {
        let form = ReminderForm {
            task: Some("Math HW".into()),
            date: Some("2025-01-01".into()),
            time: None,
        };
        assert_eq!(form.validate().unwrap_err(), "Time is required.");
    }

    #[test]
    fn parses_date_and_time() {
        let form = ReminderForm {
            task: Some(" Math HW ".into()),
            date: Some("2025-01-01".into()),
            time: Some("14:00".into()),
        };
        let reminder = form.validate().unwrap();
        assert_eq!(reminder.task, "Math HW");
        assert_eq!(reminder.date.to_string(), "2025-01-01");
        assert_eq!(reminder.time.format("%H:%M").to_string(), "14:00");
    }
}
