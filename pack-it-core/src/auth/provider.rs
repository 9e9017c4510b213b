//! Identity provider seam and the signed-in user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::{KeyValueStorage, StorageError};
use crate::sync::SyncError;

/// Storage key the signed-in user is kept under between runs.
pub const SESSION_KEY: &str = "auth-session";

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer token for the document store
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            id_token: None,
            refresh_token: None,
        }
    }
}

/// Errors from authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailExists,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("No account exists for this email")]
    AccountNotFound,

    #[error("This account has been disabled")]
    UserDisabled,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("Authentication not configured. Set auth.api_key in config.")]
    NotConfigured,

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Stored session is corrupt: {0}")]
    CorruptSession(#[from] serde_json::Error),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Connection(e.to_string())
    }
}

/// A managed identity provider with email/password accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Emails a password reset link to `email`.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The user currently signed in with the provider, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Auth-state changes; the current value is available immediately.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Reads the persisted session, if any.
pub fn load_session(storage: &dyn KeyValueStorage) -> Result<Option<AuthUser>, AuthError> {
    match storage.get(SESSION_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_session(storage: &dyn KeyValueStorage, user: &AuthUser) -> Result<(), AuthError> {
    let json = serde_json::to_string(user)?;
    storage.set(SESSION_KEY, &json)?;
    Ok(())
}

pub fn clear_session(storage: &dyn KeyValueStorage) -> Result<(), AuthError> {
    storage.delete(SESSION_KEY)?;
    Ok(())
}
