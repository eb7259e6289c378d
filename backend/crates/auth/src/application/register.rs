//! Register Use Case
//!
//! Creates a new local user account. Registration does not authenticate:
//! sessions are only opened by sign-in (local or Google).

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(input.email).map_err(|e| AuthError::Internal(e.to_string()))?;

        // Check if the email is already registered
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Hash password
        let raw_password = RawPassword::new(input.password);
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Create user
        let user = User::new_local(email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(email = %user.email, "User registered");

        Ok(RegisterOutput {
            email: user.email.to_string(),
        })
    }
}
