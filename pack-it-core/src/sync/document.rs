//! Shape of the per-user remote document.

use serde::{Deserialize, Serialize};

use crate::models::{
    PackingItem, PackingListData, PackingListDataRecord, DEFAULT_LIST_ID, DEFAULT_LIST_NAME,
};

/// Current version of the remote document layout.
pub const SCHEMA_VERSION: u32 = 2;

/// The document stored at `users/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub schema_version: u32,
    /// Milliseconds since the Unix epoch
    pub last_synced_at: Option<i64>,
    pub lists: PackingListDataRecord,
}

impl UserDocument {
    pub fn new(lists: PackingListDataRecord, last_synced_at: i64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            last_synced_at: Some(last_synced_at),
            lists,
        }
    }

    /// Decodes a remote document, upgrading the single-list layout.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match serde_json::from_value::<StoredDocument>(value)? {
            StoredDocument::Current(doc) => Ok(doc),
            StoredDocument::Legacy(legacy) => Ok(legacy.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Current(UserDocument),
    Legacy(LegacyUserDocument),
}

/// Schema 1: one flat list per user with no name or ID.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyUserDocument {
    to_buy: Vec<PackingItem>,
    to_pack: Vec<PackingItem>,
    #[serde(default)]
    suggestions: Vec<PackingItem>,
}

impl From<LegacyUserDocument> for UserDocument {
    fn from(legacy: LegacyUserDocument) -> Self {
        let mut lists = PackingListDataRecord::new();
        lists.insert(
            DEFAULT_LIST_ID.to_string(),
            PackingListData {
                name: DEFAULT_LIST_NAME.to_string(),
                to_pack: legacy.to_pack,
                to_buy: legacy.to_buy,
                suggestions: legacy.suggestions,
                shared_with: Vec::new(),
            },
        );
        Self {
            schema_version: 1,
            last_synced_at: None,
            lists,
        }
    }
}
