//! Serializable store state and the envelope it is persisted in.

use serde::{Deserialize, Serialize};

use crate::models::{default_record, PackingListDataRecord, DEFAULT_LIST_ID};

/// Storage key the store snapshot is written under.
pub const STORE_KEY: &str = "packing-storage";

/// Version of the persisted envelope.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Everything the list store persists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackingState {
    pub lists: PackingListDataRecord,
    pub active_list: Option<String>,
    /// Milliseconds since the Unix epoch of the last upload
    #[serde(default)]
    pub last_synced_at: Option<i64>,
}

impl Default for PackingState {
    fn default() -> Self {
        Self {
            lists: default_record(),
            active_list: Some(DEFAULT_LIST_ID.to_string()),
            last_synced_at: None,
        }
    }
}

/// On-disk wrapper: `{"state": ..., "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PersistedSnapshot {
    pub state: PackingState,
    #[serde(default)]
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PackingState::default();
        assert_eq!(state.lists.len(), 1);
        assert_eq!(state.active_list.as_deref(), Some(DEFAULT_LIST_ID));
        assert!(state.last_synced_at.is_none());
    }

    #[test]
    fn test_envelope_shape() {
        let snapshot = PersistedSnapshot {
            state: PackingState::default(),
            version: SNAPSHOT_VERSION,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["activeList"], "default");
        assert!(value["state"]["lastSyncedAt"].is_null());
        assert_eq!(value["state"]["lists"]["default"]["name"], "Default");
    }
}
