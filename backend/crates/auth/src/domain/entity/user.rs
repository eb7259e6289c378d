//! User Entity
//!
//! An account is identified externally by its email address. It carries a
//! local credential (Argon2id hash), a Google subject id, or both once a
//! local account has been linked to a Google identity.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email address (unique, normalized)
    pub email: Email,
    /// Local credential; absent for OAuth-only accounts
    pub password_hash: Option<UserPassword>,
    /// Google subject identifier; absent for local-only accounts
    pub google_id: Option<String>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new locally-registered user
    pub fn new_local(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash: Some(password_hash),
            google_id: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new user from a Google profile (no local credential)
    pub fn new_external(email: Email, google_id: String) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash: None,
            google_id: Some(google_id),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Attach a Google identity to an existing account
    pub fn attach_google_id(&mut self, google_id: String) {
        self.google_id = Some(google_id);
        self.updated_at = Utc::now();
    }

    /// Whether this account can sign in with a password
    pub fn has_local_credential(&self) -> bool {
        self.password_hash.is_some()
    }
}
