//! List-name validation and the rules for deleting lists.

use crate::models::{normalize_name, PackingListDataRecord};
use crate::store::PackingStore;

use super::GuardError;

/// Whether another list already uses this name (case-insensitive).
///
/// `except_id` is skipped so a list can be renamed to its own name.
pub fn is_duplicate_list_name(
    lists: &PackingListDataRecord,
    name: &str,
    except_id: Option<&str>,
) -> bool {
    let wanted = normalize_name(name);
    lists
        .iter()
        .filter(|(id, _)| Some(id.as_str()) != except_id)
        .any(|(_, list)| normalize_name(&list.name) == wanted)
}

/// Returns the trimmed name if it is usable for a new or renamed list.
pub fn validate_list_name(
    lists: &PackingListDataRecord,
    name: &str,
    except_id: Option<&str>,
) -> Result<String, GuardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GuardError::EmptyListName);
    }
    if is_duplicate_list_name(lists, trimmed, except_id) {
        return Err(GuardError::DuplicateListName(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Rejects deleting a missing list, the only list, or the active list.
pub fn can_delete_list(store: &PackingStore, id: &str) -> Result<(), GuardError> {
    if store.list(id).is_none() {
        return Err(GuardError::ListNotFound(id.to_string()));
    }
    if store.lists().len() <= 1 {
        return Err(GuardError::OnlyList);
    }
    if store.active_list_id() == Some(id) {
        return Err(GuardError::ActiveList);
    }
    Ok(())
}
