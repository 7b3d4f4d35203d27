//! services/tracker/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::auth::AuthService;
use crate::config::Config;
use chrono::Duration;
use std::sync::Arc;
use study_core::catalog::Catalog;
use study_core::ports::DatabaseService;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub auth: AuthService,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseService>, config: Arc<Config>, catalog: Catalog) -> Self {
        let auth = AuthService::new(db.clone(), Duration::hours(config.session_ttl_hours));
        Self {
            db,
            config,
            auth,
            catalog: Arc::new(catalog),
        }
    }
}
