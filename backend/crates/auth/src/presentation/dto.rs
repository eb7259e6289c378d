//! Form and query payloads

use serde::Deserialize;

/// POST /register form body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

/// POST /login form body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters the provider sends to the OAuth callback
#[derive(Debug, Clone, Deserialize)]
pub struct OauthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set when the user denied the consent screen
    pub error: Option<String>,
}
