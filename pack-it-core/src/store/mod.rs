//! Client-side list store and its persisted snapshot.

mod list_store;
mod snapshot;

pub use list_store::{PackingStore, StoreError};
pub use snapshot::{PackingState, SNAPSHOT_VERSION, STORE_KEY};
