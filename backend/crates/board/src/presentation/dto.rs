//! Form payloads

use serde::Deserialize;

/// POST /submit form body
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitForm {
    pub secret: String,
}
