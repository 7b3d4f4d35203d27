//! services/tracker/src/auth.rs
//!
//! Credential verification, account creation and the browser-session lifecycle.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use std::sync::{Arc, OnceLock};
use study_core::domain::{Session, User};
use study_core::ports::{DatabaseService, PortError};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Failed to hash password")]
    Hashing,

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

/// Hash verified when the email is unknown so both failure paths cost the same.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(b"not-a-real-password", &salt)
            .map(|hash| hash.to_string())
            .unwrap_or_default()
    })
}

#[derive(Clone)]
pub struct AuthService {
    db: Arc<dyn DatabaseService>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(db: Arc<dyn DatabaseService>, session_ttl: Duration) -> Self {
        Self { db, session_ttl }
    }

    #[instrument(name = "AuthService: Signup", skip(self, password), fields(user_email = %email))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!("Failed to hash password: {:?}", e);
                AuthError::Hashing
            })?
            .to_string();

        match self.db.create_user(name.trim(), &email, &password_hash).await {
            Ok(user) => {
                info!("Registered new user {}", user.user_id);
                Ok(user)
            }
            Err(PortError::Conflict(_)) => {
                warn!("Signup rejected: email already registered");
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => {
                error!("Failed to create user: {:?}", e);
                Err(e.into())
            }
        }
    }

    #[instrument(name = "AuthService: Login attempt", skip(self, password), fields(user_email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        // 1. Fetch the stored credentials
        let email = normalize_email(email);
        let creds = match self.db.get_user_by_email(&email).await {
            Ok(creds) => Some(creds),
            Err(PortError::NotFound(_)) => None,
            Err(e) => {
                error!("Database error during login: {:?}", e);
                return Err(e.into());
            }
        };

        // 2. Verify the password, against a throwaway hash when the user is unknown
        let stored_hash = creds
            .as_ref()
            .map(|c| c.hashed_password.as_str())
            .unwrap_or_else(|| dummy_hash());
        let verified = match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                error!("Failed to parse password hash: {:?}", e);
                false
            }
        };

        let creds = match creds {
            Some(creds) if verified => creds,
            Some(_) => {
                warn!("Login failed: invalid password");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                warn!("Login failed: user not found");
                return Err(AuthError::InvalidCredentials);
            }
        };

        // 3. Open a session for the user
        let session = Session::registered(self.new_session_id(), creds.user_id, self.expiry());
        self.open_session(&session).await.map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            e
        })?;

        info!("User authenticated successfully");
        Ok(session)
    }

    #[instrument(name = "AuthService: Guest entry", skip(self))]
    pub async fn guest_enter(&self) -> Result<Session, AuthError> {
        let session = Session::guest(self.new_session_id(), self.expiry());
        self.open_session(&session).await?;
        info!("Guest session started");
        Ok(session)
    }

    /// Ends the session if there is one. Calling it twice, or without a
    /// session, is not an error.
    #[instrument(name = "AuthService: Logout", skip_all)]
    pub async fn logout(&self, session_id: Option<&str>) -> Result<(), AuthError> {
        if let Some(session_id) = session_id {
            self.db.delete_auth_session(session_id).await?;
        }
        Ok(())
    }

    /// Looks up a live session. Unknown ids yield `None`; expired ones are
    /// removed and also yield `None`.
    pub async fn resolve(&self, session_id: &str) -> Result<Option<Session>, AuthError> {
        let session = match self.db.get_auth_session(session_id).await {
            Ok(session) => session,
            Err(PortError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if session.is_expired(Utc::now()) {
            info!("Discarding expired session");
            self.db.delete_auth_session(&session.id).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Stores a new session after sweeping out expired ones. A failed sweep
    /// is logged and does not block the new session.
    async fn open_session(&self, session: &Session) -> Result<(), AuthError> {
        match self.db.purge_expired_sessions(Utc::now()).await {
            Ok(0) => {}
            Ok(purged) => info!("Purged {} expired sessions", purged),
            Err(e) => warn!("Failed to purge expired sessions: {:?}", e),
        }
        self.db.create_auth_session(session).await?;
        Ok(())
    }

    fn new_session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + self.session_ttl
    }
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
