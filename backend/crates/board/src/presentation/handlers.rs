//! HTTP Handlers
//!
//! These routes are protected: the application wires the auth session
//! middleware in front of this router, so every request reaching a handler
//! here belongs to a signed-in user.

use axum::Form;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

use crate::application::{ListSecretsUseCase, SubmitSecretInput, SubmitSecretUseCase};
use crate::domain::repository::SecretRepository;
use crate::error::BoardResult;
use crate::presentation::dto::SubmitForm;
use crate::presentation::views;

/// Shared state for board handlers
#[derive(Clone)]
pub struct BoardAppState<R>
where
    R: SecretRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /secrets
pub async fn list_secrets<R>(State(state): State<BoardAppState<R>>) -> BoardResult<Html<String>>
where
    R: SecretRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListSecretsUseCase::new(state.repo.clone());
    let secrets = use_case.execute().await?;

    Ok(views::secrets_page(&secrets))
}

/// GET /submit
pub async fn submit_page() -> Html<String> {
    views::submit_page()
}

/// POST /submit
pub async fn submit_secret<R>(
    State(state): State<BoardAppState<R>>,
    Form(form): Form<SubmitForm>,
) -> BoardResult<Response>
where
    R: SecretRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitSecretUseCase::new(state.repo.clone());
    use_case
        .execute(SubmitSecretInput { text: form.secret })
        .await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, "/secrets".to_string())],
    )
        .into_response())
}
