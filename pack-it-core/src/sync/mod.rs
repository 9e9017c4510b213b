//! Cloud sync for packing lists.
//!
//! Each user has one document at `users/{uid}` holding every list:
//!
//! ```json
//! { "schemaVersion": 2, "lastSyncedAt": 1700000000000, "lists": { "<id>": { ... } } }
//! ```
//!
//! Uploads replace the whole document and downloads replace every local
//! list. There is no conflict resolution; the last save wins.

mod adapter;
mod client;
mod document;
mod error;
mod label;
mod remote;

pub use adapter::SyncAdapter;
pub use client::{check_server, HttpDocumentStore};
pub use document::{UserDocument, SCHEMA_VERSION};
pub use error::SyncError;
pub use label::sync_label;
pub use remote::{MemoryDocumentStore, RemoteDocumentStore};
