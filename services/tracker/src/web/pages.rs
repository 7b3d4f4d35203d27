//! services/tracker/src/web/pages.rs
//!
//! The landing page and the dashboard.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;
use std::sync::Arc;
use study_core::domain::{Session, GUEST_NAME};

use crate::error::ApiError;
use crate::web::{
    state::AppState,
    views::{render, DashboardPage, IndexPage, PlanRow},
};

/// One-shot banners passed to the dashboard through its `notice` query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    GuestCannotSavePlan,
    PlanSaved,
}

impl Notice {
    pub fn key(self) -> &'static str {
        match self {
            Notice::GuestCannotSavePlan => "guest-plan",
            Notice::PlanSaved => "plan-saved",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "guest-plan" => Some(Notice::GuestCannotSavePlan),
            "plan-saved" => Some(Notice::PlanSaved),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::GuestCannotSavePlan => {
                "Guests cannot save study plans. Please sign up or log in to keep your plan."
            }
            Notice::PlanSaved => "Your study plan has been saved.",
        }
    }

    /// Dashboard URL that displays this notice.
    pub fn dashboard_url(self) -> String {
        format!("/dashboard?notice={}", self.key())
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub notice: Option<String>,
}

pub async fn index_handler() -> Result<impl IntoResponse, ApiError> {
    render(&IndexPage {
        app_name: "Study Tracker",
    })
}

pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let notice = query
        .notice
        .as_deref()
        .and_then(Notice::from_key)
        .map(|n| n.message().to_string());

    let page = match session.user_id.filter(|_| !session.is_guest) {
        Some(user_id) => {
            let user = state.db.get_user_by_id(user_id).await?;
            let plans = state.db.get_study_plans_for_user(user_id).await?;
            DashboardPage {
                name: user.name,
                is_guest: false,
                plans: plans.iter().map(PlanRow::from).collect(),
                notice,
            }
        }
        None => DashboardPage {
            name: session
                .guest_name
                .clone()
                .unwrap_or_else(|| GUEST_NAME.to_string()),
            is_guest: true,
            plans: Vec::new(),
            notice,
        },
    };
    render(&page)
}
