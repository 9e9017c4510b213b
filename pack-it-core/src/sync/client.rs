//! HTTP client for the remote document store.
//!
//! Documents are read with `GET {server_url}/{path}` and replaced with
//! `PUT {server_url}/{path}`. Requests carry the signed-in user's ID token as
//! a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::{RemoteDocumentStore, SyncError};

/// Timeout for the health check.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Remote document store over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    http: reqwest::Client,
    server_url: String,
    token: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_url: server_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds the HTTP URL for a document path.
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            normalize_base_url(&self.server_url),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.request(method, self.build_url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteDocumentStore for HttpDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, SyncError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "Remote document not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let document: Value = response.json().await?;
        Ok(Some(document))
    }

    async fn put(&self, path: &str, document: Value) -> Result<(), SyncError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        debug!(path, "Remote document replaced");
        Ok(())
    }
}

async fn status_error(response: reqwest::Response) -> SyncError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    SyncError::Status { status, body }
}

/// Adds http:// to bare hosts and trims the trailing slash.
fn normalize_base_url(server_url: &str) -> String {
    let base = if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
        format!("http://{}", server_url)
    } else {
        server_url.to_string()
    };
    base.trim_end_matches('/').to_string()
}

/// Returns true if `{server_url}/health` answers with a success status.
pub async fn check_server(server_url: &str) -> bool {
    let url = format!("{}/health", normalize_base_url(server_url));
    let client = match reqwest::Client::builder().timeout(HEALTH_TIMEOUT).build() {
        Ok(client) => client,
        Err(_) => return false,
    };
    match client.get(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let store = HttpDocumentStore::new("http://localhost:8080");
        assert_eq!(
            store.build_url("users/abc"),
            "http://localhost:8080/users/abc"
        );

        let store = HttpDocumentStore::new("https://sync.example.com/");
        assert_eq!(
            store.build_url("/users/abc"),
            "https://sync.example.com/users/abc"
        );
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("localhost:8080"), "http://localhost:8080");
        assert_eq!(
            normalize_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_base_url("https://sync.example.com/"),
            "https://sync.example.com"
        );
    }

    #[test]
    fn test_with_token() {
        let store = HttpDocumentStore::new("http://localhost:8080");
        assert!(store.token.is_none());

        let store = store.with_token("t");
        assert_eq!(store.token.as_deref(), Some("t"));
    }
}
