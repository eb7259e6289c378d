//! Auth Middleware
//!
//! Middleware for requiring a session on protected routes. This application
//! is browser-facing, so a missing or invalid session redirects to the login
//! form instead of answering 401.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::presentation::handlers::found;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid session
pub async fn require_session<R>(
    state: AuthMiddlewareState<R>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session_valid = if let Some(token) = token {
        use_case.is_valid(&token).await
    } else {
        false
    };

    if !session_valid {
        return Err(found("/login").into_response());
    }

    Ok(next.run(req).await)
}
