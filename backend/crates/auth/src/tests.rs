//! Unit tests for auth use cases
//!
//! Use cases run against an in-memory repository fake so the full
//! register / sign-in / OAuth / session lifecycle is exercised without a
//! database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, GoogleProfile, GoogleSignInUseCase, RegisterInput, RegisterUseCase,
    SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::domain::entity::{SessionRecord, User};
use crate::domain::repository::{
    OauthStateRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository fake
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryAuthRepo {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    sessions: Arc<Mutex<HashMap<Uuid, SessionRecord>>>,
    oauth_states: Arc<Mutex<HashMap<String, (String, DateTime<Utc>)>>>,
}

impl InMemoryAuthRepo {
    fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryAuthRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &crate::domain::value_object::user_id::UserId,
    ) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == *email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }
}

impl SessionRepository for InMemoryAuthRepo {
    async fn create(&self, session: &SessionRecord) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<SessionRecord>> {
        Ok(self.sessions.lock().unwrap().get(&session_id).cloned())
    }

    async fn update(&self, session: &SessionRecord) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions.lock().unwrap().remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at_ms > now_ms);
        Ok((before - sessions.len()) as u64)
    }
}

impl OauthStateRepository for InMemoryAuthRepo {
    async fn save_state(
        &self,
        state: &str,
        pkce_verifier: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        self.oauth_states
            .lock()
            .unwrap()
            .insert(state.to_string(), (pkce_verifier.to_string(), expires_at));
        Ok(())
    }

    async fn consume_state(&self, state: &str) -> AuthResult<Option<String>> {
        let entry = self.oauth_states.lock().unwrap().remove(state);
        Ok(entry.and_then(|(verifier, expires_at)| {
            (expires_at > Utc::now()).then_some(verifier)
        }))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut states = self.oauth_states.lock().unwrap();
        let before = states.len();
        states.retain(|_, (_, expires_at)| *expires_at > now);
        Ok((before - states.len()) as u64)
    }
}

// ============================================================================
// Test helpers
// ============================================================================

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::development())
}

fn repo() -> Arc<InMemoryAuthRepo> {
    Arc::new(InMemoryAuthRepo::default())
}

async fn register(
    repo: &Arc<InMemoryAuthRepo>,
    config: &Arc<AuthConfig>,
    email: &str,
    password: &str,
) -> AuthResult<crate::application::register::RegisterOutput> {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

async fn sign_in(
    repo: &Arc<InMemoryAuthRepo>,
    config: &Arc<AuthConfig>,
    email: &str,
    password: &str,
) -> AuthResult<crate::application::sign_in::SignInOutput> {
    SignInUseCase::new(repo.clone(), repo.clone(), config.clone())
        .execute(SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_creates_user_without_session() {
    let repo = repo();
    let config = test_config();

    let output = register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    assert_eq!(output.email, "user@example.com");
    assert_eq!(repo.user_count(), 1);

    // Registration alone does not authenticate
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let second = register(&repo, &config, "user@example.com", "other-password").await;
    assert!(matches!(second, Err(AuthError::EmailTaken)));

    // The store still contains exactly one record for that email
    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let second = register(&repo, &config, "User@Example.COM", "other-password").await;
    assert!(matches!(second, Err(AuthError::EmailTaken)));
}

// ============================================================================
// Sign in
// ============================================================================

#[tokio::test]
async fn test_registered_user_can_sign_in() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let check = CheckSessionUseCase::new(repo.clone(), config.clone());
    assert!(check.is_valid(&output.session_token).await);

    // Login is recorded on the account
    let email = Email::new("user@example.com").unwrap();
    let user = UserRepository::find_by_email(repo.as_ref(), &email)
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn test_sign_in_wrong_password_rejected() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let use_case = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    let result = use_case
        .execute(SignInInput {
            email: "user@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_sign_in_unknown_email_same_error() {
    let repo = repo();
    let config = test_config();

    let use_case = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    let result = use_case
        .execute(SignInInput {
            email: "nobody@example.com".to_string(),
            password: "whatever-password".to_string(),
        })
        .await;

    // Indistinguishable from a wrong password
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_sign_in_oauth_only_account_rejected() {
    let repo = repo();
    let config = test_config();

    let email = Email::new("oauth@example.com").unwrap();
    let user = User::new_external(email, "g123".to_string());
    UserRepository::create(repo.as_ref(), &user).await.unwrap();

    let use_case = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    let result = use_case
        .execute(SignInInput {
            email: "oauth@example.com".to_string(),
            password: "whatever-password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_sign_out_destroys_session() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();
    let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let check = CheckSessionUseCase::new(repo.clone(), config.clone());
    assert!(check.is_valid(&output.session_token).await);

    let sign_out = SignOutUseCase::new(repo.clone(), config.clone());
    sign_out.execute(&output.session_token).await.unwrap();

    // The stale cookie no longer authenticates
    assert!(!check.is_valid(&output.session_token).await);
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();
    let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let sign_out = SignOutUseCase::new(repo.clone(), config.clone());
    sign_out.execute(&output.session_token).await.unwrap();
    // Destroying an already-absent session is not an error
    sign_out.execute(&output.session_token).await.unwrap();
    // Neither is an unverifiable token
    sign_out.execute("garbage-token").await.unwrap();
}

#[tokio::test]
async fn test_expired_session_resolves_to_none() {
    let repo = repo();
    let config = test_config();

    let email = Email::new("user@example.com").unwrap();
    let user = User::new_external(email.clone(), "g123".to_string());
    UserRepository::create(repo.as_ref(), &user).await.unwrap();

    let session = SessionRecord::new(user.user_id, email, chrono::Duration::milliseconds(-1));
    SessionRepository::create(repo.as_ref(), &session)
        .await
        .unwrap();

    let token =
        crate::application::session_token::sign_session_token(&config.session_secret, session.session_id);

    let check = CheckSessionUseCase::new(repo.clone(), config.clone());
    assert!(check.resolve(&token).await.unwrap().is_none());

    // Expired row is removed on resolution
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_sessions() {
    let repo = repo();

    let email = Email::new("user@example.com").unwrap();
    let user = User::new_external(email.clone(), "g123".to_string());
    UserRepository::create(repo.as_ref(), &user).await.unwrap();

    let live = SessionRecord::new(user.user_id, email.clone(), chrono::Duration::hours(12));
    let expired = SessionRecord::new(user.user_id, email, chrono::Duration::milliseconds(-1));
    SessionRepository::create(repo.as_ref(), &live).await.unwrap();
    SessionRepository::create(repo.as_ref(), &expired)
        .await
        .unwrap();

    let deleted = SessionRepository::cleanup_expired(repo.as_ref())
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(repo.session_count(), 1);
    assert!(
        SessionRepository::find_by_id(repo.as_ref(), live.session_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_tampered_token_resolves_to_none() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();
    let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let check = CheckSessionUseCase::new(repo.clone(), config.clone());
    let mut tampered = output.session_token.clone();
    tampered.push('x');
    assert!(check.resolve(&tampered).await.unwrap().is_none());
}

// ============================================================================
// Google sign-in (find-or-create)
// ============================================================================

fn google_profile(id: &str, email: &str) -> GoogleProfile {
    GoogleProfile {
        id: id.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_google_sign_in_creates_user() {
    let repo = repo();
    let config = test_config();

    let use_case = GoogleSignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    let output = use_case
        .execute(google_profile("g123", "a@b.com"))
        .await
        .unwrap();

    assert_eq!(repo.user_count(), 1);

    let user = UserRepository::find_by_google_id(repo.as_ref(), "g123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email.as_str(), "a@b.com");
    assert!(!user.has_local_credential());

    // A session was established
    let check = CheckSessionUseCase::new(repo.clone(), config.clone());
    assert!(check.is_valid(&output.session_token).await);
}

#[tokio::test]
async fn test_google_sign_in_reuses_existing_user() {
    let repo = repo();
    let config = test_config();

    let use_case = GoogleSignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    use_case
        .execute(google_profile("g123", "a@b.com"))
        .await
        .unwrap();
    use_case
        .execute(google_profile("g123", "a@b.com"))
        .await
        .unwrap();

    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn test_google_sign_in_links_local_account() {
    let repo = repo();
    let config = test_config();

    register(&repo, &config, "user@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let use_case = GoogleSignInUseCase::new(repo.clone(), repo.clone(), config.clone());
    use_case
        .execute(google_profile("g456", "user@example.com"))
        .await
        .unwrap();

    // Linked, not duplicated
    assert_eq!(repo.user_count(), 1);

    let email = Email::new("user@example.com").unwrap();
    let user = UserRepository::find_by_email(repo.as_ref(), &email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.google_id.as_deref(), Some("g456"));
    // The local credential survives linking
    assert!(user.has_local_credential());
}

// ============================================================================
// OAuth state store semantics
// ============================================================================

#[tokio::test]
async fn test_oauth_state_single_use() {
    let repo = repo();
    let expires = Utc::now() + chrono::Duration::minutes(10);

    OauthStateRepository::save_state(repo.as_ref(), "st", "verifier", expires)
        .await
        .unwrap();

    assert_eq!(
        OauthStateRepository::consume_state(repo.as_ref(), "st")
            .await
            .unwrap()
            .as_deref(),
        Some("verifier")
    );
    // Second consumption fails
    assert!(
        OauthStateRepository::consume_state(repo.as_ref(), "st")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_oauth_state_expired_rejected() {
    let repo = repo();
    let expires = Utc::now() - chrono::Duration::minutes(1);

    OauthStateRepository::save_state(repo.as_ref(), "st", "verifier", expires)
        .await
        .unwrap();

    assert!(
        OauthStateRepository::consume_state(repo.as_ref(), "st")
            .await
            .unwrap()
            .is_none()
    );
}

// ============================================================================
// Session middleware
// ============================================================================

mod middleware {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Router, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::presentation::middleware::{AuthMiddlewareState, require_session};

    /// A protected route wired the way the application composes it
    fn protected_app(repo: Arc<InMemoryAuthRepo>, config: Arc<AuthConfig>) -> Router {
        let state = AuthMiddlewareState { repo, config };

        Router::new()
            .route("/secrets", get(|| async { "secret content" }))
            .route_layer(axum::middleware::from_fn(
                move |req: axum::extract::Request, next: axum::middleware::Next| {
                    let state = state.clone();
                    async move { require_session(state, req, next).await }
                },
            ))
    }

    #[tokio::test]
    async fn test_no_cookie_redirects_to_login() {
        let repo = repo();
        let config = test_config();
        let app = protected_app(repo, config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/secrets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_garbage_cookie_redirects_to_login() {
        let repo = repo();
        let config = test_config();
        let app = protected_app(repo, config);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/secrets")
                    .header(header::COOKIE, "session=garbage-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_valid_session_passes_through() {
        let repo = repo();
        let config = test_config();

        register(&repo, &config, "user@example.com", "hunter2hunter2")
            .await
            .unwrap();
        let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
            .await
            .unwrap();

        let app = protected_app(repo, config.clone());
        let cookie = format!(
            "{}={}",
            config.session_cookie_name, output.session_token
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/secrets")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stale_cookie_after_sign_out_redirects() {
        let repo = repo();
        let config = test_config();

        register(&repo, &config, "user@example.com", "hunter2hunter2")
            .await
            .unwrap();
        let output = sign_in(&repo, &config, "user@example.com", "hunter2hunter2")
            .await
            .unwrap();

        SignOutUseCase::new(repo.clone(), config.clone())
            .execute(&output.session_token)
            .await
            .unwrap();

        let app = protected_app(repo, config.clone());
        let cookie = format!(
            "{}={}",
            config.session_cookie_name, output.session_token
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/secrets")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
