//! Shared fixtures: an in-memory `DatabaseService` and helpers for driving the
//! router with `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use study_core::catalog::Catalog;
use study_core::domain::{
    NewProgressEntry, NewReminder, NewStudyPlan, ProgressEntry, ProgressOwner, Reminder, Session,
    StudyPlan, User, UserCredentials,
};
use study_core::ports::{DatabaseService, PortError, PortResult};
use tower::ServiceExt;
use tracker_lib::config::Config;
use tracker_lib::web::{app_router, AppState};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<(User, String)>,
    sessions: Vec<Session>,
    plans: Vec<StudyPlan>,
    reminders: Vec<Reminder>,
    progress: Vec<ProgressEntry>,
}

#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

/// Text of the error every call returns while the store is offline.
pub const STORE_OFFLINE: &str = "connection refused by memory store";

impl MemoryDb {
    /// Makes every subsequent call fail with `PortError::Unexpected`.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn available(&self) -> PortResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected(STORE_OFFLINE.to_string()));
        }
        Ok(())
    }

    /// Sessions whose expiry is pushed into the past, by id.
    pub fn expire_session(&self, session_id: &str) {
        let past = chrono::Utc::now() - chrono::Duration::minutes(1);
        for session in self.tables.lock().unwrap().sessions.iter_mut() {
            if session.id == session_id {
                session.expires_at = past;
            }
        }
    }

    pub fn progress_count(&self) -> usize {
        self.tables.lock().unwrap().progress.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn plan_count(&self) -> usize {
        self.tables.lock().unwrap().plans.len()
    }

    pub fn session_count(&self) -> usize {
        self.tables.lock().unwrap().sessions.len()
    }

    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(_, hash)| hash.clone())
    }

    pub fn expire_all_sessions(&self) {
        let past = chrono::Utc::now() - chrono::Duration::minutes(1);
        for session in self.tables.lock().unwrap().sessions.iter_mut() {
            session.expires_at = past;
        }
    }
}

#[async_trait]
impl DatabaseService for MemoryDb {
    async fn create_user(&self, name: &str, email: &str, hashed_password: &str) -> PortResult<User> {
        self.available()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|(u, _)| u.email == email) {
            return Err(PortError::Conflict(email.to_string()));
        }
        let user = User {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
        };
        tables.users.push((user.clone(), hashed_password.to_string()));
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.available()?;
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                user_id: u.user_id,
                email: u.email.clone(),
                hashed_password: hash.clone(),
            })
            .ok_or_else(|| PortError::NotFound("User not found".into()))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        self.available()?;
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|(u, _)| u.user_id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn create_auth_session(&self, session: &Session) -> PortResult<()> {
        self.available()?;
        self.tables.lock().unwrap().sessions.push(session.clone());
        Ok(())
    }

    async fn get_auth_session(&self, session_id: &str) -> PortResult<Session> {
        self.available()?;
        let tables = self.tables.lock().unwrap();
        tables
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Session not found".into()))
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.available()?;
        let mut tables = self.tables.lock().unwrap();
        tables.sessions.retain(|s| s.id != session_id);
        tables
            .progress
            .retain(|p| p.owner != ProgressOwner::Guest(session_id.to_string()));
        Ok(())
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> PortResult<u64> {
        self.available()?;
        let mut tables = self.tables.lock().unwrap();
        let expired: Vec<String> = tables
            .sessions
            .iter()
            .filter(|s| s.expires_at < now)
            .map(|s| s.id.clone())
            .collect();
        tables.sessions.retain(|s| s.expires_at >= now);
        tables.progress.retain(|p| match &p.owner {
            ProgressOwner::Guest(id) => !expired.contains(id),
            ProgressOwner::User(_) => true,
        });
        Ok(expired.len() as u64)
    }

    async fn create_study_plan(&self, plan: NewStudyPlan) -> PortResult<StudyPlan> {
        self.available()?;
        let plan = StudyPlan {
            id: Uuid::new_v4(),
            user_id: plan.user_id,
            subject: plan.subject,
            hours_per_day: plan.hours_per_day,
            start_date: plan.start_date,
            end_date: plan.end_date,
        };
        self.tables.lock().unwrap().plans.push(plan.clone());
        Ok(plan)
    }

    async fn get_study_plans_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>> {
        self.available()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_reminder(&self, reminder: NewReminder) -> PortResult<Reminder> {
        self.available()?;
        let reminder = Reminder {
            id: Uuid::new_v4(),
            task: reminder.task,
            date: reminder.date,
            time: reminder.time,
        };
        self.tables.lock().unwrap().reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn list_reminders(&self) -> PortResult<Vec<Reminder>> {
        self.available()?;
        Ok(self.tables.lock().unwrap().reminders.clone())
    }

    async fn append_progress(&self, entry: NewProgressEntry) -> PortResult<ProgressEntry> {
        self.available()?;
        let entry = ProgressEntry {
            id: Uuid::new_v4(),
            owner: entry.owner,
            date: entry.date,
            hours: entry.hours,
        };
        self.tables.lock().unwrap().progress.push(entry.clone());
        Ok(entry)
    }

    async fn get_progress(&self, owner: &ProgressOwner) -> PortResult<Vec<ProgressEntry>> {
        self.available()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .progress
            .iter()
            .filter(|p| &p.owner == owner)
            .cloned()
            .collect())
    }
}

//=========================================================================================
// Router Helpers
//=========================================================================================

pub fn test_config() -> Config {
    Config {
        bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        log_level: tracing::Level::INFO,
        session_ttl_hours: 1,
        cookie_secure: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDb>,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::default());
        let catalog = Catalog::builtin().expect("bundled catalog parses");
        let state = AppState::new(db.clone(), Arc::new(test_config()), catalog);
        Self {
            router: app_router(Arc::new(state)),
            db,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Response<Body> {
        let body = format!("name={}&email={}&password={}", name, email, password);
        self.post_form("/auth/signup", &body, None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response<Body> {
        let body = format!("email={}&password={}", email, password);
        self.post_form("/auth/login", &body, None).await
    }

    /// Signs up and logs in, returning the `Cookie` header value to send.
    pub async fn registered_cookie(&self, email: &str) -> String {
        let signup = self.signup("Ada", email, "s3cret-pass").await;
        assert_eq!(signup.status(), StatusCode::SEE_OTHER);
        let login = self.login(email, "s3cret-pass").await;
        assert_eq!(login.status(), StatusCode::SEE_OTHER);
        session_cookie(&login).expect("login sets a session cookie")
    }

    pub async fn guest_cookie(&self) -> String {
        let response = self.get("/auth/guest", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("guest entry sets a session cookie")
    }
}

/// The `session=<id>` pair from a `Set-Cookie` header, if one was set.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
        .filter(|pair| pair.starts_with("session=") && pair.len() > "session=".len())
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
