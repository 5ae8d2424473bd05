//! # Auth Service
//!
//! Login sessions for the store's employees. Passwords are stored as
//! salted SHA-256 digests; a successful login creates a session row
//! whose UUID doubles as the bearer token. Sessions expire after the
//! configured TTL and expired rows are purged at startup.

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::{queries, Database, SessionRecord, UserRole};
use crate::models::LoginResponse;
use crate::utils::hash_password;

/// Errors that can occur in auth operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately not
    /// distinguishing the two.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, or expired session token.
    #[error("Not authenticated")]
    Unauthorized,

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<crate::db::DatabaseError> for AuthError {
    fn from(e: crate::db::DatabaseError) -> Self {
        AuthError::DatabaseError(e.to_string())
    }
}

/// Session and login management service.
#[derive(Clone)]
pub struct AuthService {
    /// Database connection for users and sessions.
    db: Database,

    /// Application configuration (TTL, salt).
    config: AppConfig,
}

impl AuthService {
    /// Create a new AuthService instance.
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self { db, config }
    }

    /// Create the default admin account when the users table is empty.
    ///
    /// Username `admin`, password `admin123`. Meant for first boot
    /// only; the password should be changed immediately.
    pub async fn ensure_default_admin(&self) -> Result<(), AuthError> {
        let count = queries::count_users(self.db.pool()).await?;
        if count > 0 {
            return Ok(());
        }

        let hash = hash_password("admin123", &self.config.password_salt);
        queries::create_user(
            self.db.pool(),
            "admin",
            &hash,
            "Store Administrator",
            UserRole::Admin.as_str(),
        ).await?;

        warn!("Created default admin account (admin/admin123) - change the password");
        Ok(())
    }

    /// Verify credentials and open a session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthError> {
        let user = queries::get_user_by_username(self.db.pool(), username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = hash_password(password, &self.config.password_salt);
        if hash != user.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let session = SessionRecord {
            session_id: Uuid::new_v4(),
            user_id: user.user_id,
            role: user.role.clone(),
            created_at: now,
            expires_at: now + Duration::minutes(self.config.session_ttl_minutes),
        };
        queries::create_session(self.db.pool(), &session).await?;

        info!("User {} logged in (session {})", user.username, session.session_id);

        Ok(LoginResponse {
            token: session.session_id,
            user_id: user.user_id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            expires_at: session.expires_at,
        })
    }

    /// Validate a bearer token and return its session.
    ///
    /// Returns `Unauthorized` for malformed tokens, unknown sessions,
    /// and expired sessions alike.
    pub async fn validate(&self, token: &str) -> Result<SessionRecord, AuthError> {
        let session_id = Uuid::parse_str(token).map_err(|_| AuthError::Unauthorized)?;

        queries::get_valid_session(self.db.pool(), session_id, Utc::now())
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    /// Close a session (logout). Returns whether one was closed.
    pub async fn logout(&self, token: &str) -> Result<bool, AuthError> {
        let session_id = Uuid::parse_str(token).map_err(|_| AuthError::Unauthorized)?;
        Ok(queries::delete_session(self.db.pool(), session_id).await?)
    }

    /// Remove expired sessions. Called at startup.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        let purged = queries::delete_expired_sessions(self.db.pool(), Utc::now()).await?;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
        Ok(purged)
    }
}
