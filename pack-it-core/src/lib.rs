//! Pack It Core Library
//!
//! Packing lists, cloud sync, authentication and AI suggestions shared by
//! Pack It front ends.

pub mod auth;
pub mod guards;
pub mod models;
pub mod storage;
pub mod store;
pub mod suggest;
pub mod sync;

pub use auth::{AuthError, AuthSession, AuthUser, FirebaseIdentityProvider, IdentityProvider};
pub use guards::{AddOutcome, GuardError};
pub use models::{
    ListType, PackingItem, PackingListData, PackingListDataRecord, DEFAULT_LIST_ID,
    DEFAULT_LIST_NAME,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{PackingState, PackingStore, StoreError};
pub use suggest::{SuggestError, SuggestionGenerator, SuggestionOutcome, TripDetails};
pub use sync::{check_server, HttpDocumentStore, SyncAdapter, SyncError, UserDocument};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
