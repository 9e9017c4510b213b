//! Email/password accounts through the Firebase Identity Toolkit REST API.
//!
//! - `POST {base}/accounts:signInWithPassword?key={api_key}`
//! - `POST {base}/accounts:signUp?key={api_key}`
//! - `POST {base}/accounts:sendOobCode?key={api_key}` (password reset)
//!
//! Sign-out is local: the provider simply forgets the session.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::debug;

use super::{AuthError, AuthUser, IdentityProvider};

/// Default Identity Toolkit endpoint.
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity provider backed by Firebase Authentication.
pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    state: watch::Sender<Option<AuthUser>>,
}

impl FirebaseIdentityProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_IDENTITY_URL.to_string(),
            state,
        }
    }

    /// Starts with a previously persisted session.
    pub fn with_session(self, user: Option<AuthUser>) -> Self {
        self.state.send_replace(user);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            action,
            urlencoding::encode(&self.api_key)
        )
    }

    /// POSTs a JSON body to an Identity Toolkit action, mapping error replies.
    async fn post(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, AuthError> {
        if self.api_key.is_empty() {
            return Err(AuthError::NotConfigured);
        }

        let response = self
            .http
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let body: ErrorResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Provider(e.to_string()))?;
            return Err(map_provider_error(&body.error.message));
        }
        Ok(response)
    }

    async fn password_request(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let response = self
            .post(
                action,
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true
                }),
            )
            .await?;

        let body: TokenResponse = response.json().await?;
        let user = AuthUser {
            uid: body.local_id,
            email: body.email,
            id_token: Some(body.id_token),
            refresh_token: body.refresh_token,
        };
        debug!(uid = %user.uid, action, "Identity provider accepted credentials");
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.password_request("signInWithPassword", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.password_request("signUp", email, password).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.post(
            "sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email
            }),
        )
        .await
        .map_err(reset_error)?;
        debug!("Password reset email requested");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.state.send_replace(None);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps Identity Toolkit error codes (e.g. `EMAIL_EXISTS`) to auth errors.
///
/// Some codes carry a detail after a colon, e.g.
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
fn map_provider_error(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "INVALID_EMAIL" => AuthError::InvalidEmail,
        "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
        "USER_DISABLED" => AuthError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::Provider(message.to_string()),
    }
}

/// `EMAIL_NOT_FOUND` means a missing account when no password was involved.
fn reset_error(e: AuthError) -> AuthError {
    match e {
        AuthError::InvalidCredentials => AuthError::AccountNotFound,
        other => other,
    }
}
