//! services/tracker/src/web/middleware.rs
//!
//! Session middleware for pages that need a logged-in or guest visitor.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::web::{cookie, state::AppState};

/// Middleware that resolves the `session` cookie into a `Session`.
///
/// If valid, inserts the session into request extensions for handlers to use.
/// Missing, unknown or expired sessions are sent to the login page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(session_id) = cookie::session_id(req.headers()).map(str::to_owned) else {
        return Redirect::to("/auth/login").into_response();
    };

    match state.auth.resolve(&session_id).await {
        Ok(Some(session)) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Ok(None) => Redirect::to("/auth/login").into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
