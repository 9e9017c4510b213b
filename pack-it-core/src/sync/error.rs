//! Sync error types.

/// Errors that can occur while talking to the remote document store.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Sync is not configured
    #[error("Sync not configured. Add sync.server_url to config.")]
    NotConfigured,

    /// There is no signed-in user to sync for
    #[error("Not signed in")]
    NotSignedIn,

    /// Failed to reach the server
    #[error("Connection error: {0}")]
    Connection(String),

    /// Server answered with a non-success status
    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Remote document could not be decoded
    #[error("Invalid remote document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Connection(e.to_string())
    }
}
