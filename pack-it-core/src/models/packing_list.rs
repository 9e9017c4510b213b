//! Packing lists and the record of all lists.
//!
//! A packing list owns three sub-lists: items still to pack, items to buy
//! before the trip, and AI-generated suggestions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{normalize_name, ListType, PackingItem};

/// ID of the list every fresh or reset store starts with.
pub const DEFAULT_LIST_ID: &str = "default";

/// Name given to the default list.
pub const DEFAULT_LIST_NAME: &str = "Default";

/// All packing lists keyed by list ID.
///
/// Ordered so that serialization is stable and "first remaining list"
/// is deterministic.
pub type PackingListDataRecord = BTreeMap<String, PackingListData>;

/// A single named packing list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackingListData {
    pub name: String,
    #[serde(default)]
    pub to_pack: Vec<PackingItem>,
    #[serde(default)]
    pub to_buy: Vec<PackingItem>,
    #[serde(default)]
    pub suggestions: Vec<PackingItem>,
    /// Collaborator identifiers (e.g. email addresses)
    #[serde(default)]
    pub shared_with: Vec<String>,
}

impl PackingListData {
    /// Create an empty list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Borrow one sub-list.
    pub fn items(&self, list_type: ListType) -> &Vec<PackingItem> {
        match list_type {
            ListType::ToPack => &self.to_pack,
            ListType::ToBuy => &self.to_buy,
            ListType::Suggestions => &self.suggestions,
        }
    }

    /// Mutably borrow one sub-list.
    pub fn items_mut(&mut self, list_type: ListType) -> &mut Vec<PackingItem> {
        match list_type {
            ListType::ToPack => &mut self.to_pack,
            ListType::ToBuy => &mut self.to_buy,
            ListType::Suggestions => &mut self.suggestions,
        }
    }

    /// Find an item by ID in one sub-list.
    pub fn find(&self, list_type: ListType, id: &str) -> Option<&PackingItem> {
        self.items(list_type).iter().find(|i| i.id == id)
    }

    /// Find an item by name (trimmed, case-insensitive) in one sub-list.
    pub fn find_by_name(&self, list_type: ListType, name: &str) -> Option<&PackingItem> {
        let wanted = normalize_name(name);
        self.items(list_type)
            .iter()
            .find(|i| i.normalized_name() == wanted)
    }

    /// Total number of items across all three sub-lists.
    pub fn item_count(&self) -> usize {
        self.to_pack.len() + self.to_buy.len() + self.suggestions.len()
    }

    /// Number of items in "to pack" already marked as packed.
    pub fn packed_count(&self) -> usize {
        self.to_pack.iter().filter(|i| i.packed).count()
    }

    /// Whether the list is shared with the given collaborator (case-insensitive).
    pub fn is_shared_with(&self, who: &str) -> bool {
        let who = normalize_name(who);
        self.shared_with.iter().any(|s| normalize_name(s) == who)
    }
}

/// A record holding only the default list.
pub fn default_record() -> PackingListDataRecord {
    let mut lists = PackingListDataRecord::new();
    lists.insert(
        DEFAULT_LIST_ID.to_string(),
        PackingListData::new(DEFAULT_LIST_NAME),
    );
    lists
}
