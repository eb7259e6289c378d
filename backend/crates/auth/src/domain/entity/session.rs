//! Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{email::Email, user_id::UserId};

/// Server-side session record
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Email of the user at session creation
    pub email: Email,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, email: Email, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            email,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_ttl(ttl: Duration) -> SessionRecord {
        SessionRecord::new(
            UserId::new(),
            Email::new("user@example.com").unwrap(),
            ttl,
        )
    }

    #[test]
    fn test_fresh_session_not_expired() {
        let session = session_with_ttl(Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_past_ttl_session_expired() {
        let session = session_with_ttl(Duration::milliseconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_touch_updates_activity() {
        let mut session = session_with_ttl(Duration::hours(12));
        let before = session.last_activity_at;
        session.touch();
        assert!(session.last_activity_at >= before);
    }
}
