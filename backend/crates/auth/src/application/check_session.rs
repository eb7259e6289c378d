//! Check Session Use Case
//!
//! Resolves a session token back to the session record.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Resolve a token to its session.
    ///
    /// A missing, tampered, unknown, or expired token resolves to `None`
    /// ("not authenticated"); `Err` is reserved for store failures.
    pub async fn resolve(&self, session_token: &str) -> AuthResult<Option<SessionRecord>> {
        let Some(session_id) = parse_session_token(&self.config.session_secret, session_token)
        else {
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Ok(None);
        }

        // Update last activity (fire and forget)
        let mut session = session;
        session.touch();

        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(Some(session))
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str) -> bool {
        matches!(self.resolve(session_token).await, Ok(Some(_)))
    }
}
