//! crates/study_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// Display name shown for guest sessions.
pub const GUEST_NAME: &str = "Guest";

// Represents a user - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

/// A browser session referenced by the `session` cookie.
///
/// Registered sessions carry a `user_id`; guest sessions carry none and are
/// flagged with `is_guest`.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user_id: Option<Uuid>,
    pub is_guest: bool,
    pub guest_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn registered(id: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: Some(user_id),
            is_guest: false,
            guest_name: None,
            expires_at,
        }
    }

    pub fn guest(id: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: None,
            is_guest: true,
            guest_name: Some(GUEST_NAME.to_string()),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Only registered, non-guest sessions may persist study plans.
    pub fn can_write_plans(&self) -> bool {
        !self.is_guest && self.user_id.is_some()
    }

    /// Whose progress log this session reads and appends to.
    pub fn progress_owner(&self) -> ProgressOwner {
        match self.user_id {
            Some(user_id) if !self.is_guest => ProgressOwner::User(user_id),
            _ => ProgressOwner::Guest(self.id.clone()),
        }
    }
}

/// Represents a study commitment owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub hours_per_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewStudyPlan {
    pub user_id: Uuid,
    pub subject: String,
    pub hours_per_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// A scheduled task note. Reminders are global and not owned by any user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: Uuid,
    pub task: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub task: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProgressOwner {
    User(Uuid),
    /// Guests log against their session id.
    Guest(String),
}

/// One recorded block of study hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub owner: ProgressOwner,
    pub date: NaiveDate,
    pub hours: u32,
}

#[derive(Debug, Clone)]
pub struct NewProgressEntry {
    pub owner: ProgressOwner,
    pub date: NaiveDate,
    pub hours: u32,
}
