//! services/tracker/src/error.rs
//!
//! Defines the primary error type for the entire tracker service.

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::web::views::ErrorPage;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use study_core::ports::PortError;
use tracing::error;

/// The primary error type for the `tracker` service.
///
/// Anything that reaches a handler boundary as an `ApiError` is not locally
/// recoverable and is shown to the user as a generic failure page.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the persistence port.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Authentication failures that a handler chose not to recover inline.
    #[error("Auth Error: {0}")]
    Auth(#[from] AuthError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A view failed to render.
    #[error("Template Error: {0}")]
    Template(#[from] askama::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {:?}", self);

        let page = ErrorPage {
            message: "Something went wrong on our side. Please try again in a moment.",
        };
        match page.render() {
            Ok(body) => (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response(),
            Err(e) => {
                error!("Failed to render error page: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
