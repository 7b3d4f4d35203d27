//! services/tracker/src/web/auth.rs
//!
//! Authentication pages: signup, login, guest entry and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::web::{
    cookie, forms,
    state::AppState,
    views::{render, render_with_status, LoginPage, SignupPage},
};

/// Shown for both an unknown email and a wrong password.
pub const LOGIN_FAILED: &str = "Invalid email or password. Please try again.";
pub const DUPLICATE_EMAIL: &str = "Email already exists. Please log in.";

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Passwords are taken as typed; only emptiness is checked.
fn required_password(value: Option<&str>) -> Result<&str, String> {
    value
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "Password is required.".to_string())
}

fn with_session_cookie(state: &AppState, session_id: &str, to: &str) -> Response {
    let cookie = cookie::set_session(
        session_id,
        state.auth.session_ttl(),
        state.config.cookie_secure,
    );
    ([(header::SET_COOKIE, cookie)], Redirect::to(to)).into_response()
}

//=========================================================================================
// Handlers
//=========================================================================================

pub async fn login_page() -> Result<impl IntoResponse, ApiError> {
    render(&LoginPage::default())
}

/// POST /auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirected to the dashboard"),
        (status = 401, description = "Invalid credentials, form shown again"),
        (status = 422, description = "Missing field, form shown again"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let fields = forms::required(form.email.as_deref(), "Email")
        .and_then(|email| Ok((email, required_password(form.password.as_deref())?)));
    let (email, password) = match fields {
        Ok(fields) => fields,
        Err(message) => {
            let page = LoginPage { error: Some(message) };
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response());
        }
    };

    match state.auth.login(email, password).await {
        Ok(session) => Ok(with_session_cookie(&state, &session.id, "/dashboard")),
        Err(AuthError::InvalidCredentials) => {
            let page = LoginPage {
                error: Some(LOGIN_FAILED.to_string()),
            };
            Ok(render_with_status(StatusCode::UNAUTHORIZED, &page)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn signup_page() -> Result<impl IntoResponse, ApiError> {
    render(&SignupPage::default())
}

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirected to login"),
        (status = 409, description = "Email already registered, form shown again"),
        (status = 422, description = "Missing field, form shown again"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    let name = form.name.as_deref().map(str::trim).unwrap_or_default().to_string();
    let fields = forms::required(form.name.as_deref(), "Name").and_then(|name| {
        let email = forms::required(form.email.as_deref(), "Email")?;
        Ok((name, email, required_password(form.password.as_deref())?))
    });
    let (valid_name, email, password) = match fields {
        Ok(fields) => fields,
        Err(message) => {
            let page = SignupPage {
                warning: Some(message),
                name,
            };
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)?.into_response());
        }
    };

    match state.auth.signup(valid_name, email, password).await {
        Ok(_) => Ok(Redirect::to("/auth/login").into_response()),
        Err(AuthError::DuplicateEmail) => {
            let page = SignupPage {
                warning: Some(DUPLICATE_EMAIL.to_string()),
                name,
            };
            Ok(render_with_status(StatusCode::CONFLICT, &page)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /auth/guest - Start a guest session
#[utoipa::path(
    get,
    path = "/auth/guest",
    responses(
        (status = 303, description = "Guest session started, redirected to the dashboard")
    )
)]
pub async fn guest_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let session = state.auth.guest_enter().await?;
    Ok(with_session_cookie(&state, &session.id, "/dashboard"))
}

/// GET /auth/logout - End the current session, if any
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses(
        (status = 303, description = "Session cleared, redirected home")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    // The cookie is cleared even when the stored session could not be removed.
    match state.auth.logout(cookie::session_id(&headers)).await {
        Ok(()) => info!("Session cleared"),
        Err(e) => error!("Failed to delete session on logout: {:?}", e),
    }

    let cookie = cookie::clear_session(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}
