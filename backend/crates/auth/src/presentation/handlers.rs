//! HTTP Handlers

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::CookieConfig;

use crate::application::config::AuthConfig;
use crate::application::{
    GoogleAuth, GoogleSignInUseCase, RegisterInput, RegisterUseCase, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::repository::{OauthStateRepository, SessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::dto::{LoginForm, OauthCallbackQuery, RegisterForm};
use crate::presentation::views;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub google: Arc<GoogleAuth>,
}

// ============================================================================
// Pages
// ============================================================================

/// GET /login
pub async fn login_page() -> Html<String> {
    views::login_page()
}

/// GET /register
pub async fn register_page() -> Html<String> {
    views::register_page()
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<RegisterForm>,
) -> Response
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: form.email,
        password: form.password,
    };

    // Registration does not open a session; the browser is sent on to
    // /secrets and the auth middleware takes it from there.
    match use_case.execute(input).await {
        Ok(_) => found("/secrets").into_response(),
        // Duplicate email is a 409, store failures a 500; both via AuthError
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case =
        SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: form.email,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = build_session_cookie(&state.config, &output.session_token);
            ([(header::SET_COOKIE, cookie)], found("/secrets")).into_response()
        }
        // Bad credentials send the browser back to the form, never an error body
        Err(AuthError::InvalidCredentials) => found("/login").into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config);

    ([(header::SET_COOKIE, cookie)], found("/")).into_response()
}

// ============================================================================
// Google OAuth
// ============================================================================

/// GET /auth/google
pub async fn google_start<R>(State(state): State<AuthAppState<R>>) -> Response
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    match state.google.authorize_url(state.repo.as_ref()).await {
        Ok(url) => found(&url).into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET /auth/google/secrets (the provider callback)
pub async fn google_callback<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<OauthCallbackQuery>,
) -> Response
where
    R: UserRepository
        + SessionRepository
        + OauthStateRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    if let Some(error) = &query.error {
        tracing::warn!(error = %error, "Google OAuth denied");
        return found("/login").into_response();
    }

    let (Some(code), Some(csrf_state)) = (query.code.as_deref(), query.state.as_deref()) else {
        return found("/login").into_response();
    };

    let profile = match state
        .google
        .exchange_code(state.repo.as_ref(), code, csrf_state)
        .await
    {
        Ok(profile) => profile,
        // A broken handshake sends the browser back to login
        Err(err @ (AuthError::OauthStateInvalid | AuthError::OauthExchange(_))) => {
            tracing::warn!(error = %err, "Google OAuth handshake failed");
            return found("/login").into_response();
        }
        Err(err) => return err.into_response(),
    };

    let use_case = GoogleSignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case.execute(profile).await {
        Ok(output) => {
            let cookie = build_session_cookie(&state.config, &output.session_token);
            ([(header::SET_COOKIE, cookie)], found("/secrets")).into_response()
        }
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 302 Found redirect (what a browser form flow expects)
pub fn found(location: &str) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
}

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}

fn cookie_config(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl.as_secs() as i64),
    }
}

fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    cookie_config(config).build_set_cookie(token)
}

fn build_clear_cookie(config: &AuthConfig) -> String {
    cookie_config(config).build_delete_cookie()
}
