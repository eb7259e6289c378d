//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by Google subject id
    async fn find_by_google_id(&self, google_id: &str) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &SessionRecord) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<SessionRecord>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &SessionRecord) -> AuthResult<()>;

    /// Delete a session (idempotent)
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// OAuth handshake state repository trait
///
/// Persists the CSRF state and PKCE verifier between the authorize redirect
/// and the provider callback. Entries are single-use.
#[trait_variant::make(OauthStateRepository: Send)]
pub trait LocalOauthStateRepository {
    /// Persist a pending handshake
    async fn save_state(
        &self,
        state: &str,
        pkce_verifier: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Atomically consume a pending handshake, returning its PKCE verifier
    ///
    /// Returns `None` when the state is unknown, expired, or already used.
    async fn consume_state(&self, state: &str) -> AuthResult<Option<String>>;

    /// Clean up expired handshake entries
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
