mod auth;
mod config_cmd;
mod item;
mod list;
mod suggest;
mod sync_cmd;

pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use item::ItemCommand;
pub use list::ListCommand;
pub use suggest::SuggestCommand;
pub use sync_cmd::SyncCommand;

use pack_it_core::models::normalize_name;
use pack_it_core::{GuardError, ListType, PackingListData, PackingStore};

/// Finds a list by ID, falling back to a case-insensitive name match.
pub(crate) fn resolve_list(store: &PackingStore, key: &str) -> Result<String, GuardError> {
    if store.list(key).is_some() {
        return Ok(key.to_string());
    }
    let wanted = normalize_name(key);
    store
        .lists()
        .iter()
        .find(|(_, list)| normalize_name(&list.name) == wanted)
        .map(|(id, _)| id.clone())
        .ok_or_else(|| GuardError::ListNotFound(key.to_string()))
}

/// Finds an item in a sub-list by ID or case-insensitive name.
pub(crate) fn resolve_item(
    list: &PackingListData,
    list_type: ListType,
    key: &str,
) -> Result<String, ItemNotFound> {
    list.find(list_type, key)
        .or_else(|| list.find_by_name(list_type, key))
        .map(|item| item.id.clone())
        .ok_or_else(|| ItemNotFound {
            key: key.to_string(),
            list_type,
        })
}

#[derive(Debug)]
pub struct ItemNotFound {
    key: String,
    list_type: ListType,
}

impl std::fmt::Display for ItemNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No item '{}' in {}", self.key, self.list_type.label())
    }
}

impl std::error::Error for ItemNotFound {}
