//! The packing list store.
//!
//! Owns every list and item. Each mutation runs against the in-memory state
//! and then writes a snapshot through to the key-value storage. Guard
//! conditions (only list, active list, empty names, duplicates) are the
//! caller's business; see [`crate::guards`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::snapshot::{PackingState, PersistedSnapshot, SNAPSHOT_VERSION, STORE_KEY};
use crate::models::{
    default_record, normalize_name, ListType, PackingItem, PackingListData,
    PackingListDataRecord, DEFAULT_LIST_ID,
};
use crate::storage::{KeyValueStorage, MemoryStorage, StorageError};

/// Errors that can occur while loading the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Stored packing data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// In-memory packing list state persisted after every mutation.
pub struct PackingStore {
    state: PackingState,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for PackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackingStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PackingStore {
    /// Loads the store from storage, starting fresh if nothing was saved yet.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        let state = match storage.get(STORE_KEY)? {
            Some(json) => {
                let snapshot: PersistedSnapshot = serde_json::from_str(&json)?;
                debug!(
                    lists = snapshot.state.lists.len(),
                    version = snapshot.version,
                    "Loaded packing snapshot"
                );
                snapshot.state
            }
            None => PackingState::default(),
        };

        let mut store = Self { state, storage };
        store.repair_active_list();
        Ok(store)
    }

    /// A store backed by throwaway in-memory storage.
    pub fn in_memory() -> Self {
        Self {
            state: PackingState::default(),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> &PackingState {
        &self.state
    }

    pub fn lists(&self) -> &PackingListDataRecord {
        &self.state.lists
    }

    pub fn list(&self, id: &str) -> Option<&PackingListData> {
        self.state.lists.get(id)
    }

    pub fn active_list_id(&self) -> Option<&str> {
        self.state.active_list.as_deref()
    }

    /// The active list, if the active ID references an existing list.
    pub fn active_list(&self) -> Option<&PackingListData> {
        self.state
            .active_list
            .as_ref()
            .and_then(|id| self.state.lists.get(id))
    }

    pub fn last_synced_at(&self) -> Option<i64> {
        self.state.last_synced_at
    }

    // ------------------------------------------------------------------
    // List operations
    // ------------------------------------------------------------------

    /// Inserts an empty list under a fresh ID and returns the ID.
    ///
    /// The new list is not selected.
    pub fn create_list(&mut self, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.mutate(|state| {
            state
                .lists
                .insert(id.clone(), PackingListData::new(name.trim()));
        });
        id
    }

    pub fn rename_list(&mut self, id: &str, new_name: &str) {
        self.mutate(|state| {
            if let Some(list) = state.lists.get_mut(id) {
                list.name = new_name.trim().to_string();
            }
        });
    }

    /// Removes a list. If it was active, the first remaining list becomes
    /// active; if none remain, the default list is recreated.
    pub fn delete_list(&mut self, id: &str) {
        self.mutate(|state| {
            if state.lists.remove(id).is_none() {
                return;
            }
            if state.lists.is_empty() {
                state.lists = default_record();
            }
            if state.active_list.as_deref() == Some(id) {
                state.active_list = state.lists.keys().next().cloned();
            }
        });
    }

    pub fn set_active_list(&mut self, id: &str) {
        if !self.state.lists.contains_key(id) {
            return;
        }
        self.mutate(|state| state.active_list = Some(id.to_string()));
    }

    /// Adds a collaborator to a list's `shared_with`.
    pub fn share_list(&mut self, id: &str, collaborator: &str) {
        let collaborator = collaborator.trim();
        if collaborator.is_empty() {
            return;
        }
        self.mutate(|state| {
            if let Some(list) = state.lists.get_mut(id) {
                if !list.is_shared_with(collaborator) {
                    list.shared_with.push(collaborator.to_string());
                }
            }
        });
    }

    pub fn unshare_list(&mut self, id: &str, collaborator: &str) {
        let wanted = normalize_name(collaborator);
        self.mutate(|state| {
            if let Some(list) = state.lists.get_mut(id) {
                list.shared_with.retain(|s| normalize_name(s) != wanted);
            }
        });
    }

    // ------------------------------------------------------------------
    // Item operations (all against the active list)
    // ------------------------------------------------------------------

    pub fn add_item(&mut self, list_type: ListType, item: PackingItem) {
        self.mutate_active(|list| list.items_mut(list_type).push(item));
    }

    pub fn remove_item(&mut self, list_type: ListType, id: &str) {
        self.mutate_active(|list| list.items_mut(list_type).retain(|i| i.id != id));
    }

    /// Flips `packed` on a "to pack" item.
    pub fn toggle_packed(&mut self, id: &str) {
        self.mutate_active(|list| {
            if let Some(item) = list.to_pack.iter_mut().find(|i| i.id == id) {
                item.packed = !item.packed;
            }
        });
    }

    /// Moves an item between sub-lists, resetting `packed`.
    pub fn copy_item(&mut self, from: ListType, to: ListType, id: &str) {
        if from == to {
            return;
        }
        self.mutate_active(|list| {
            let source = list.items_mut(from);
            if let Some(index) = source.iter().position(|i| i.id == id) {
                let mut item = source.remove(index);
                item.packed = false;
                list.items_mut(to).push(item);
            }
        });
    }

    pub fn clear_list(&mut self, list_type: ListType) {
        self.mutate_active(|list| list.items_mut(list_type).clear());
    }

    /// Copies the source list's "to buy" and "to pack" items into the active
    /// list, skipping names the active list already has in either sub-list.
    ///
    /// Returns how many items were merged.
    pub fn merge_list(&mut self, source_id: &str) -> usize {
        let Some(active_id) = self.state.active_list.clone() else {
            return 0;
        };
        if source_id == active_id {
            return 0;
        }
        let Some(source) = self.state.lists.get(source_id).cloned() else {
            return 0;
        };
        if !self.state.lists.contains_key(&active_id) {
            return 0;
        }

        let mut merged = 0;
        self.mutate(|state| {
            let Some(active) = state.lists.get_mut(&active_id) else {
                return;
            };
            let mut seen: HashSet<String> = active
                .to_buy
                .iter()
                .chain(active.to_pack.iter())
                .map(PackingItem::normalized_name)
                .collect();

            for list_type in [ListType::ToBuy, ListType::ToPack] {
                for item in source.items(list_type) {
                    if seen.insert(item.normalized_name()) {
                        active.items_mut(list_type).push(item.clone());
                        merged += 1;
                    }
                }
            }
        });

        debug!(source = source_id, merged, "Merged list into active list");
        merged
    }

    // ------------------------------------------------------------------
    // Whole-state operations
    // ------------------------------------------------------------------

    /// Overwrites every list, e.g. after a cloud download.
    pub fn replace_all_data(&mut self, lists: PackingListDataRecord) {
        self.mutate(|state| {
            state.lists = if lists.is_empty() {
                default_record()
            } else {
                lists
            };
        });
        self.repair_active_list();
    }

    /// Resets to a single empty default list.
    pub fn clear_all_lists(&mut self) {
        self.mutate(|state| {
            state.lists = default_record();
            state.active_list = Some(DEFAULT_LIST_ID.to_string());
        });
    }

    pub fn set_last_synced_at(&mut self, ts: i64) {
        self.mutate(|state| state.last_synced_at = Some(ts));
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Points the active ID back at an existing list if it drifted.
    fn repair_active_list(&mut self) {
        let valid = self
            .state
            .active_list
            .as_ref()
            .is_some_and(|id| self.state.lists.contains_key(id));
        if !valid {
            let fallback = self.state.lists.keys().next().cloned();
            self.mutate(|state| state.active_list = fallback);
        }
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut PackingState) -> R) -> R {
        let result = f(&mut self.state);
        self.persist();
        result
    }

    fn mutate_active(&mut self, f: impl FnOnce(&mut PackingListData)) {
        let Some(active_id) = self.state.active_list.clone() else {
            return;
        };
        if !self.state.lists.contains_key(&active_id) {
            return;
        }
        self.mutate(|state| {
            if let Some(list) = state.lists.get_mut(&active_id) {
                f(list);
            }
        });
    }

    fn persist(&self) {
        let snapshot = PersistedSnapshot {
            state: self.state.clone(),
            version: SNAPSHOT_VERSION,
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize packing snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(STORE_KEY, &json) {
            warn!("Failed to persist packing snapshot: {}", e);
        }
    }
}
