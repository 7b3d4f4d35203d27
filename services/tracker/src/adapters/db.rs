//! services/tracker/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};
use study_core::domain::{
    NewProgressEntry, NewReminder, NewStudyPlan, ProgressEntry, ProgressOwner, Reminder, Session,
    StudyPlan, User, UserCredentials,
};
use study_core::ports::{DatabaseService, PortError, PortResult};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn not_found_or_unexpected(e: sqlx::Error, what: impl FnOnce() -> String) -> PortError {
    match e {
        sqlx::Error::RowNotFound => PortError::NotFound(what()),
        _ => unexpected(e),
    }
}

fn hours_to_db(hours: u32) -> PortResult<i32> {
    i32::try_from(hours).map_err(|_| PortError::Unexpected(format!("{} hours is out of range", hours)))
}

fn hours_from_db(hours: i32) -> PortResult<u32> {
    u32::try_from(hours).map_err(|_| PortError::Unexpected(format!("stored hours {} is negative", hours)))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    email: String,
    password_hash: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.id,
            email: self.email,
            hashed_password: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct SessionRecord {
    id: String,
    user_id: Option<Uuid>,
    is_guest: bool,
    guest_name: Option<String>,
    expires_at: DateTime<Utc>,
}
impl SessionRecord {
    fn to_domain(self) -> Session {
        Session {
            id: self.id,
            user_id: self.user_id,
            is_guest: self.is_guest,
            guest_name: self.guest_name,
            expires_at: self.expires_at,
        }
    }
}

#[derive(FromRow)]
struct StudyPlanRecord {
    id: Uuid,
    user_id: Uuid,
    subject: String,
    hours_per_day: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}
impl StudyPlanRecord {
    fn to_domain(self) -> PortResult<StudyPlan> {
        Ok(StudyPlan {
            id: self.id,
            user_id: self.user_id,
            subject: self.subject,
            hours_per_day: hours_from_db(self.hours_per_day)?,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(FromRow)]
struct ReminderRecord {
    id: Uuid,
    task: String,
    remind_on: NaiveDate,
    remind_at: NaiveTime,
}
impl ReminderRecord {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: self.id,
            task: self.task,
            date: self.remind_on,
            time: self.remind_at,
        }
    }
}

#[derive(FromRow)]
struct ProgressRecord {
    id: Uuid,
    user_id: Option<Uuid>,
    session_id: Option<String>,
    entry_date: NaiveDate,
    hours: i32,
}
impl ProgressRecord {
    fn to_domain(self) -> PortResult<ProgressEntry> {
        let owner = match (self.user_id, self.session_id) {
            (Some(user_id), _) => ProgressOwner::User(user_id),
            (None, Some(session_id)) => ProgressOwner::Guest(session_id),
            (None, None) => {
                return Err(PortError::Unexpected(format!(
                    "progress entry {} has no owner",
                    self.id
                )))
            }
        };
        Ok(ProgressEntry {
            id: self.id,
            owner,
            date: self.entry_date,
            hours: hours_from_db(self.hours)?,
        })
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING id, name, email",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PortError::Conflict(format!("email {} is already registered", email))
            }
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, || "User not found".to_string()))?;
        Ok(record.to_domain())
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let record =
            sqlx::query_as::<_, UserRecord>("SELECT id, name, email FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| not_found_or_unexpected(e, || format!("User {} not found", user_id)))?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(&self, session: &Session) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO auth_sessions (id, user_id, is_guest, guest_name, expires_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.is_guest)
        .bind(&session.guest_name)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_auth_session(&self, session_id: &str) -> PortResult<Session> {
        let record = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, is_guest, guest_name, expires_at FROM auth_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, || "Session not found".to_string()))?;
        Ok(record.to_domain())
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> PortResult<u64> {
        let result = sqlx::query("DELETE FROM auth_sessions WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected())
    }

    async fn create_study_plan(&self, plan: NewStudyPlan) -> PortResult<StudyPlan> {
        let record = sqlx::query_as::<_, StudyPlanRecord>(
            "INSERT INTO study_plans (id, user_id, subject, hours_per_day, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, user_id, subject, hours_per_day, start_date, end_date",
        )
        .bind(Uuid::new_v4())
        .bind(plan.user_id)
        .bind(&plan.subject)
        .bind(hours_to_db(plan.hours_per_day)?)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        record.to_domain()
    }

    async fn get_study_plans_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>> {
        let records = sqlx::query_as::<_, StudyPlanRecord>(
            "SELECT id, user_id, subject, hours_per_day, start_date, end_date FROM study_plans \
             WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(StudyPlanRecord::to_domain).collect()
    }

    async fn create_reminder(&self, reminder: NewReminder) -> PortResult<Reminder> {
        let record = sqlx::query_as::<_, ReminderRecord>(
            "INSERT INTO reminders (id, task, remind_on, remind_at) VALUES ($1, $2, $3, $4) \
             RETURNING id, task, remind_on, remind_at",
        )
        .bind(Uuid::new_v4())
        .bind(&reminder.task)
        .bind(reminder.date)
        .bind(reminder.time)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_reminders(&self) -> PortResult<Vec<Reminder>> {
        let records = sqlx::query_as::<_, ReminderRecord>(
            "SELECT id, task, remind_on, remind_at FROM reminders ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let reminders = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(reminders)
    }

    async fn append_progress(&self, entry: NewProgressEntry) -> PortResult<ProgressEntry> {
        let (user_id, session_id) = match &entry.owner {
            ProgressOwner::User(user_id) => (Some(*user_id), None),
            ProgressOwner::Guest(session_id) => (None, Some(session_id.as_str())),
        };
        let record = sqlx::query_as::<_, ProgressRecord>(
            "INSERT INTO progress_entries (id, user_id, session_id, entry_date, hours) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_id, session_id, entry_date, hours",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(session_id)
        .bind(entry.date)
        .bind(hours_to_db(entry.hours)?)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        record.to_domain()
    }

    async fn get_progress(&self, owner: &ProgressOwner) -> PortResult<Vec<ProgressEntry>> {
        let query = match owner {
            ProgressOwner::User(user_id) => sqlx::query_as::<_, ProgressRecord>(
                "SELECT id, user_id, session_id, entry_date, hours FROM progress_entries \
                 WHERE user_id = $1 ORDER BY created_at ASC",
            )
            .bind(*user_id),
            ProgressOwner::Guest(session_id) => sqlx::query_as::<_, ProgressRecord>(
                "SELECT id, user_id, session_id, entry_date, hours FROM progress_entries \
                 WHERE session_id = $1 ORDER BY created_at ASC",
            )
            .bind(session_id.clone()),
        };
        let records = query.fetch_all(&self.pool).await.map_err(unexpected)?;

        records.into_iter().map(ProgressRecord::to_domain).collect()
    }
}
