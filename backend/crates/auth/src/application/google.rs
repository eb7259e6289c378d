//! Google Sign-In
//!
//! Authorization Code flow with PKCE against Google's OAuth endpoints.
//!
//! ## Flow
//! 1. [`GoogleAuth::authorize_url`] builds the authorization URL requesting
//!    the `profile` and `email` scopes, generates a random PKCE challenge and
//!    persists the CSRF state + verifier server-side with a short expiry.
//! 2. The provider redirects back to the callback route, which calls
//!    [`GoogleAuth::exchange_code`]: the stored state is atomically consumed
//!    (validating CSRF and expiry in one step), the code + verifier are
//!    exchanged for an access token, and the user's profile is fetched from
//!    the userinfo endpoint.
//! 3. [`GoogleSignInUseCase`] maps the profile onto the user store with
//!    find-or-create semantics and opens a session.

use std::sync::Arc;
use std::time::Duration;

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;

use crate::application::config::{AuthConfig, GoogleConfig};
use crate::application::session_token::sign_session_token;
use crate::application::sign_in::SignInOutput;
use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::repository::{OauthStateRepository, SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Userinfo endpoint for profile retrieval
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google user info from the userinfo API
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Provider-scoped unique subject identifier
    pub id: String,
    pub email: String,
}

/// OAuth client type with auth URL and token URL set
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handshake handler
pub struct GoogleAuth {
    config: GoogleConfig,
    /// How long a pending handshake stays valid
    state_ttl: Duration,
}

impl GoogleAuth {
    pub fn new(config: GoogleConfig, state_ttl: Duration) -> Self {
        Self { config, state_ttl }
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Build the authorization URL and persist the handshake state
    pub async fn authorize_url<R>(&self, state_repo: &R) -> AuthResult<String>
    where
        R: OauthStateRepository,
    {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let expires_at = chrono::Utc::now()
            + chrono::Duration::from_std(self.state_ttl)
                .map_err(|e| AuthError::Internal(format!("Invalid OAuth state TTL: {e}")))?;

        state_repo
            .save_state(csrf_state.secret(), pkce_verifier.secret(), expires_at)
            .await?;

        Ok(auth_url.to_string())
    }

    /// Complete the handshake: consume the state, exchange the code, fetch
    /// the profile
    pub async fn exchange_code<R>(
        &self,
        state_repo: &R,
        code: &str,
        state: &str,
    ) -> AuthResult<GoogleProfile>
    where
        R: OauthStateRepository,
    {
        let pkce_verifier = state_repo
            .consume_state(state)
            .await?
            .ok_or(AuthError::OauthStateInvalid)?;

        // The oauth2 crate expects a client that does not follow redirects
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::OauthExchange(format!("Token exchange failed: {e}")))?;

        let access_token = token_result.access_token().secret();

        let profile: GoogleProfile = reqwest::Client::new()
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::OauthExchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OauthExchange(e.to_string()))?;

        Ok(profile)
    }
}

/// Google sign in use case (find-or-create)
pub struct GoogleSignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> GoogleSignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Map a verified Google profile onto the user store and open a session.
    ///
    /// Lookup order:
    /// 1. by `google_id` - returning OAuth user;
    /// 2. by email - an existing local account gets the `google_id` attached
    ///    (the provider has verified control of the address);
    /// 3. otherwise a new account is created without a local credential.
    pub async fn execute(&self, profile: GoogleProfile) -> AuthResult<SignInOutput> {
        let email = Email::new(profile.email).map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = match self.user_repo.find_by_google_id(&profile.id).await? {
            Some(user) => user,
            None => match self.user_repo.find_by_email(&email).await? {
                Some(mut user) => {
                    user.attach_google_id(profile.id.clone());
                    self.user_repo.update(&user).await?;

                    tracing::info!(
                        email = %user.email,
                        "Linked Google identity to existing account"
                    );
                    user
                }
                None => {
                    let user = User::new_external(email, profile.id.clone());
                    self.user_repo.create(&user).await?;

                    tracing::info!(email = %user.email, "User created from Google profile");
                    user
                }
            },
        };

        let mut user = user;
        user.record_login();
        self.user_repo.update(&user).await?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = SessionRecord::new(user.user_id, user.email.clone(), ttl);
        self.session_repo.create(&session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            email = %user.email,
            session_id = %session.session_id,
            "User signed in via Google"
        );

        Ok(SignInOutput {
            session_token,
            email: user.email.to_string(),
        })
    }
}
