//! Uploads and downloads the whole list store for a user.
//!
//! Last writer wins: saves overwrite the remote document and loads overwrite
//! every local list.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::{RemoteDocumentStore, SyncError, UserDocument};
use crate::store::PackingStore;

/// Moves store snapshots between the local store and the remote document store.
#[derive(Clone)]
pub struct SyncAdapter {
    remote: Arc<dyn RemoteDocumentStore>,
}

impl SyncAdapter {
    pub fn new(remote: Arc<dyn RemoteDocumentStore>) -> Self {
        Self { remote }
    }

    /// Path of a user's document.
    pub fn user_path(user_id: &str) -> String {
        format!("users/{}", urlencoding::encode(user_id))
    }

    /// Overwrites the remote document with the store's current lists.
    ///
    /// The local `last_synced_at` is stamped before the write goes out.
    pub async fn save_user_packing_data(
        &self,
        store: &mut PackingStore,
        user_id: &str,
    ) -> Result<(), SyncError> {
        let now = Utc::now().timestamp_millis();
        let document = UserDocument::new(store.lists().clone(), now);
        store.set_last_synced_at(now);

        let value = serde_json::to_value(&document)?;
        self.remote.put(&Self::user_path(user_id), value).await?;

        info!(lists = document.lists.len(), "Saved packing data to cloud");
        Ok(())
    }

    /// Fetches the remote document, if any.
    pub async fn get_user_packing_data(
        &self,
        user_id: &str,
    ) -> Result<Option<UserDocument>, SyncError> {
        match self.remote.get(&Self::user_path(user_id)).await? {
            Some(value) => Ok(Some(UserDocument::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Replaces local lists with the remote copy.
    ///
    /// Returns `false` if the user has no remote document yet.
    pub async fn pull_user_packing_data(
        &self,
        store: &mut PackingStore,
        user_id: &str,
    ) -> Result<bool, SyncError> {
        let Some(document) = self.get_user_packing_data(user_id).await? else {
            return Ok(false);
        };

        debug!(
            schema = document.schema_version,
            lists = document.lists.len(),
            "Applying remote packing data"
        );
        let synced_at = document
            .last_synced_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        store.replace_all_data(document.lists);
        store.set_last_synced_at(synced_at);
        Ok(true)
    }
}
