//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::Secret;
use crate::error::BoardResult;

/// Secret repository trait
#[trait_variant::make(SecretRepository: Send)]
pub trait LocalSecretRepository {
    /// Persist a new secret
    async fn create(&self, secret: &Secret) -> BoardResult<()>;

    /// Bulk read of every secret on the board
    async fn list_all(&self) -> BoardResult<Vec<Secret>>;
}
