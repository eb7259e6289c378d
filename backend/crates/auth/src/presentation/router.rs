//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::google::GoogleAuth;
use crate::domain::repository::{OauthStateRepository, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig, google: GoogleAuth) -> Router {
    auth_router_generic(repo, config, google)
}

/// Create a generic auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, google: GoogleAuth) -> Router
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        google: Arc::new(google),
    };

    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login::<R>))
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register::<R>),
        )
        .route("/logout", get(handlers::logout::<R>))
        .route("/auth/google", get(handlers::google_start::<R>))
        .route(
            "/auth/google/secrets",
            get(handlers::google_callback::<R>),
        )
        .with_state(state)
}
