//! Sign In Use Case
//!
//! Authenticates a user against the local credential and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub email: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown email, missing local credential, and wrong password all
    /// surface as the same `InvalidCredentials` so responses cannot be used
    /// to enumerate accounts.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = user
            .password_hash
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::new(input.password);
        if !password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Update user's last login
        let mut user = user;
        user.record_login();
        self.user_repo.update(&user).await?;

        // Create session
        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = SessionRecord::new(user.user_id, user.email.clone(), ttl);
        self.session_repo.create(&session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            email = %user.email,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            email: user.email.to_string(),
        })
    }
}
