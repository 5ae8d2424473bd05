//! # Activity Logger Service
//!
//! Thin audit-trail writer. Every login, registration, sale, and
//! transfer is recorded so admins can see who did what. Logging is
//! best effort: a failed insert is warned about but never fails the
//! operation that triggered it.

use tracing::warn;

use crate::db::{queries, ActivityLogEntry, Database, DatabaseError};

/// Audit trail service.
#[derive(Clone)]
pub struct ActivityLogger {
    /// Database connection for the activity_log table.
    db: Database,
}

impl ActivityLogger {
    /// Create a new ActivityLogger instance.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record an action. Best effort; errors are logged and swallowed.
    pub async fn log(&self, user_id: Option<i32>, action: &str, details: Option<&str>) {
        if let Err(e) = queries::create_activity(self.db.pool(), user_id, action, details).await {
            warn!("Failed to write activity log entry '{}': {}", action, e);
        }
    }

    /// Recent activity entries, newest first.
    pub async fn recent(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLogEntry>, DatabaseError> {
        queries::list_activity(self.db.pool(), limit, offset).await
    }
}
