//! crates/study_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of a specific persistence implementation.

use crate::domain::{
    NewProgressEntry, NewReminder, NewStudyPlan, ProgressEntry, ProgressOwner, Reminder, Session,
    StudyPlan, User, UserCredentials,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicts with an existing item: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---

    /// Fails with `PortError::Conflict` when the email is already registered.
    async fn create_user(&self, name: &str, email: &str, hashed_password: &str)
        -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User>;

    // --- Browser Sessions ---
    async fn create_auth_session(&self, session: &Session) -> PortResult<()>;

    async fn get_auth_session(&self, session_id: &str) -> PortResult<Session>;

    /// Deleting a missing session is not an error.
    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    /// Removes every session that expired before `now`, with any guest
    /// progress attached to it. Returns how many sessions were removed.
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> PortResult<u64>;

    // --- Study Plans ---
    async fn create_study_plan(&self, plan: NewStudyPlan) -> PortResult<StudyPlan>;

    async fn get_study_plans_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>>;

    // --- Reminders ---
    async fn create_reminder(&self, reminder: NewReminder) -> PortResult<Reminder>;

    /// All reminders in insertion order.
    async fn list_reminders(&self) -> PortResult<Vec<Reminder>>;

    // --- Progress Log ---
    async fn append_progress(&self, entry: NewProgressEntry) -> PortResult<ProgressEntry>;

    async fn get_progress(&self, owner: &ProgressOwner) -> PortResult<Vec<ProgressEntry>>;
}
