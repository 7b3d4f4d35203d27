//! services/tracker/src/web/api_doc.rs
//!
//! The master definition for the OpenAPI description of the form endpoints.

use utoipa::OpenApi;

use crate::web::{auth, lookup, progress, reminders, study};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_post,
        auth::login_post,
        auth::guest_handler,
        auth::logout_handler,
        study::study_plan_post,
        study::performance_post,
        reminders::reminders_post,
        progress::progress_post,
        lookup::materials_post,
        lookup::classes_post,
        lookup::internships_post,
        lookup::papers_post,
    ),
    components(
        schemas(
            auth::SignupForm,
            auth::LoginForm,
            study::StudyPlanForm,
            study::PerformanceForm,
            reminders::ReminderForm,
            progress::ProgressForm,
            lookup::LookupForm,
        )
    ),
    tags(
        (name = "Study Tracker", description = "Server-rendered pages for planning and tracking study time.")
    )
)]
pub struct ApiDoc;
