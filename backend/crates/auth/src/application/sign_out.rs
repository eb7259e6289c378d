//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the session carried by `session_token`.
    ///
    /// Idempotent: an unverifiable token or an already-absent session is not
    /// an error, the client ends up signed out either way.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let Some(session_id) = parse_session_token(&self.config.session_secret, session_token)
        else {
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
