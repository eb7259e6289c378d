//! Domain Entities
//!
//! Core business entities for the board domain.

use chrono::{DateTime, Utc};
use kernel::id::SecretId;

/// Secret entity - an anonymous free-text post on the shared board
///
/// Deliberately carries no author reference; posting requires a session but
/// the record itself is unattributed.
#[derive(Debug, Clone)]
pub struct Secret {
    pub secret_id: SecretId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Secret {
    /// Create a new secret
    pub fn new(text: String) -> Self {
        Self {
            secret_id: SecretId::new(),
            text,
            created_at: Utc::now(),
        }
    }
}
