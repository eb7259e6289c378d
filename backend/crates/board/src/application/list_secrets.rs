//! List Secrets Use Case
//!
//! Bulk read of the shared board.

use std::sync::Arc;

use crate::domain::entities::Secret;
use crate::domain::repository::SecretRepository;
use crate::error::BoardResult;

/// List secrets use case
pub struct ListSecretsUseCase<R>
where
    R: SecretRepository,
{
    secret_repo: Arc<R>,
}

impl<R> ListSecretsUseCase<R>
where
    R: SecretRepository,
{
    pub fn new(secret_repo: Arc<R>) -> Self {
        Self { secret_repo }
    }

    pub async fn execute(&self) -> BoardResult<Vec<Secret>> {
        self.secret_repo.list_all().await
    }
}
