//! Session Entity
//!
//! Server-side binding of a session id to a user. The id is what the signed
//! cookie token carries.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Session record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new session for `user_id`
    ///
    /// Expiry is computed by the caller from configuration.
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
