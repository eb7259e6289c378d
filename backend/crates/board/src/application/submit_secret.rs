//! Submit Secret Use Case
//!
//! Appends an anonymous post to the shared board.

use std::sync::Arc;

use crate::domain::entities::Secret;
use crate::domain::repository::SecretRepository;
use crate::error::BoardResult;

/// Submit secret input
pub struct SubmitSecretInput {
    pub text: String,
}

/// Submit secret use case
pub struct SubmitSecretUseCase<R>
where
    R: SecretRepository,
{
    secret_repo: Arc<R>,
}

impl<R> SubmitSecretUseCase<R>
where
    R: SecretRepository,
{
    pub fn new(secret_repo: Arc<R>) -> Self {
        Self { secret_repo }
    }

    pub async fn execute(&self, input: SubmitSecretInput) -> BoardResult<Secret> {
        let secret = Secret::new(input.text);
        self.secret_repo.create(&secret).await?;

        tracing::info!(secret_id = %secret.secret_id, "Secret submitted");

        Ok(secret)
    }
}
