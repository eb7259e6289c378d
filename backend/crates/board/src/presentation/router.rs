//! Board Router
//!
//! Session gating is layered on by the application, not here.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::SecretRepository;
use crate::infra::postgres::PgBoardRepository;
use crate::presentation::handlers::{self, BoardAppState};

/// Create the board router with PostgreSQL repository
pub fn board_router(repo: PgBoardRepository) -> Router {
    board_router_generic(repo)
}

/// Create a generic board router for any repository implementation
pub fn board_router_generic<R>(repo: R) -> Router
where
    R: SecretRepository + Clone + Send + Sync + 'static,
{
    let state = BoardAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/secrets", get(handlers::list_secrets::<R>))
        .route(
            "/submit",
            get(handlers::submit_page).post(handlers::submit_secret::<R>),
        )
        .with_state(state)
}
