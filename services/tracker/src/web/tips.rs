//! services/tracker/src/web/tips.rs

use axum::response::IntoResponse;
use rand::seq::SliceRandom;
use study_core::tips::MOTIVATIONAL_TIPS;

use crate::error::ApiError;
use crate::web::views::{render, TipsPage};

pub async fn tips_page() -> Result<impl IntoResponse, ApiError> {
    render(&TipsPage { tip: None })
}

/// Draws a tip at random. Not meant to be reproducible.
pub async fn tips_post() -> Result<impl IntoResponse, ApiError> {
    let tip = MOTIVATIONAL_TIPS.choose(&mut rand::thread_rng()).copied();
    render(&TipsPage { tip })
}
