//! Composed flows: guard first, then mutate.

use tracing::debug;

use super::{can_delete_list, check_new_item, validate_list_name, GuardError, ItemCheck};
use crate::models::{ListType, PackingItem};
use crate::store::PackingStore;

/// What `add_named_item` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(PackingItem),
    /// The name existed in the other sub-list and was moved into the target
    Moved { item_id: String, from: ListType },
}

/// Adds a named item to the active list, applying the duplicate-item policy.
///
/// If the name already lives in the counterpart sub-list, it is moved when
/// `move_existing` is set and rejected otherwise.
pub fn add_named_item(
    store: &mut PackingStore,
    target: ListType,
    name: &str,
    move_existing: bool,
) -> Result<AddOutcome, GuardError> {
    let list = store.active_list().ok_or(GuardError::NoActiveList)?;
    let name = name.trim();

    match check_new_item(list, target, name)? {
        ItemCheck::New => {
            let item = PackingItem::new(name);
            store.add_item(target, item.clone());
            Ok(AddOutcome::Added(item))
        }
        ItemCheck::Duplicate => Err(GuardError::DuplicateItem {
            name: name.to_string(),
            list: target,
        }),
        ItemCheck::ExistsInOther { list, item_id } => {
            if !move_existing {
                return Err(GuardError::ItemInOtherList {
                    name: name.to_string(),
                    list,
                });
            }
            debug!(item = %item_id, from = %list, to = %target, "Moving existing item");
            store.copy_item(list, target, &item_id);
            Ok(AddOutcome::Moved {
                item_id,
                from: list,
            })
        }
    }
}

/// Creates a list under a validated name and selects it.
pub fn create_and_select_list(store: &mut PackingStore, name: &str) -> Result<String, GuardError> {
    let name = validate_list_name(store.lists(), name, None)?;
    let id = store.create_list(&name);
    store.set_active_list(&id);
    Ok(id)
}

pub fn rename_list_checked(
    store: &mut PackingStore,
    id: &str,
    new_name: &str,
) -> Result<(), GuardError> {
    if store.list(id).is_none() {
        return Err(GuardError::ListNotFound(id.to_string()));
    }
    let name = validate_list_name(store.lists(), new_name, Some(id))?;
    store.rename_list(id, &name);
    Ok(())
}

pub fn delete_list_checked(store: &mut PackingStore, id: &str) -> Result<(), GuardError> {
    can_delete_list(store, id)?;
    store.delete_list(id);
    Ok(())
}
