//! Remote document store seam.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::SyncError;

/// A remote store of whole JSON documents addressed by path (`users/{uid}`).
///
/// Writes replace the full document; there is no field-level merge.
#[async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Returns `Ok(None)` if no document exists at `path`.
    async fn get(&self, path: &str) -> Result<Option<Value>, SyncError>;

    async fn put(&self, path: &str, document: Value) -> Result<(), SyncError>;
}

/// Remote store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored document, for inspection.
    pub fn document(&self, path: &str) -> Option<Value> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }
}

#[async_trait]
impl RemoteDocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, SyncError> {
        Ok(self.document(path))
    }

    async fn put(&self, path: &str, document: Value) -> Result<(), SyncError> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), document);
        Ok(())
    }
}
