pub mod api_doc;
pub mod auth;
pub mod cookie;
pub mod forms;
pub mod lookup;
pub mod middleware;
pub mod pages;
pub mod progress;
pub mod reminders;
pub mod state;
pub mod study;
pub mod tips;
pub mod views;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use api_doc::ApiDoc;
pub use middleware::require_session;
pub use state::AppState;

/// Builds the complete application router.
pub fn app_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(pages::index_handler))
        .route("/auth/login", get(auth::login_page).post(auth::login_post))
        .route("/auth/signup", get(auth::signup_page).post(auth::signup_post))
        .route("/auth/guest", get(auth::guest_handler))
        .route("/auth/logout", get(auth::logout_handler))
        .route("/motivational-tips", get(tips::tips_page).post(tips::tips_post))
        .route(
            "/study-materials",
            get(lookup::materials_page).post(lookup::materials_post),
        )
        .route(
            "/online-classes",
            get(lookup::classes_page).post(lookup::classes_post),
        )
        .route(
            "/internships",
            get(lookup::internships_page).post(lookup::internships_post),
        )
        .route(
            "/question-papers",
            get(lookup::papers_page).post(lookup::papers_post),
        );

    // Session routes (logged-in user or guest)
    let session_routes = Router::new()
        .route("/dashboard", get(pages::dashboard_handler))
        .route(
            "/study-plan",
            get(study::study_plan_page).post(study::study_plan_post),
        )
        .route(
            "/performance-input",
            get(study::performance_page).post(study::performance_post),
        )
        .route(
            "/reminders",
            get(reminders::reminders_page).post(reminders::reminders_post),
        )
        .route("/reminders/all", get(reminders::all_reminders_page))
        .route(
            "/progress-tracking",
            get(progress::progress_page).post(progress::progress_post),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    let pages_router = Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Merge the page router with the Swagger UI router for a complete application.
    Router::new()
        .merge(pages_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
