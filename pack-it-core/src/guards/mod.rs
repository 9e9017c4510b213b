//! Caller-level guards that run before store mutations.
//!
//! The store never rejects anything on its own. Front ends run these checks
//! first and surface the error to the user, or use the composed flows in
//! [`actions`] which do both steps.

pub mod actions;
mod items;
mod lists;

pub use actions::{
    add_named_item, create_and_select_list, delete_list_checked, rename_list_checked, AddOutcome,
};
pub use items::{check_new_item, ItemCheck};
pub use lists::{can_delete_list, is_duplicate_list_name, validate_list_name};

use crate::models::ListType;

/// A guard rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Item name cannot be empty")]
    EmptyItemName,

    #[error("'{name}' is already in {}", .list.label())]
    DuplicateItem { name: String, list: ListType },

    #[error("'{name}' is already in {}; move it instead", .list.label())]
    ItemInOtherList { name: String, list: ListType },

    #[error("List name cannot be empty")]
    EmptyListName,

    #[error("A list named '{0}' already exists")]
    DuplicateListName(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Cannot delete the only list")]
    OnlyList,

    #[error("Cannot delete the active list; select another list first")]
    ActiveList,

    #[error("No active list")]
    NoActiveList,
}
