//! Persistence lifecycle for recordkit records.
//!
//! [`RemoteRecord`] adds identity, timestamps and soft deletion on top of a
//! [`Record`](recordkit_model::Record) and delegates storage to a
//! [`RecordStore`]. The store's hooks fail with
//! [`Error::NotImplemented`] until a backend overrides them;
//! [`MemoryStore`] is an in-process backend.
//!
//! ```
//! use recordkit_model::{Schema, Type};
//! use recordkit_remote::{LifecycleState, MemoryStore, RemoteRecord};
//! use std::sync::Arc;
//!
//! # async fn run() -> recordkit_remote::Result<()> {
//! let schema = Schema::builder("Note")
//!     .property("title", Type::string())
//!     .build();
//! let store = Arc::new(MemoryStore::new());
//!
//! let mut note = RemoteRecord::new(schema, store.clone());
//! note.set("title", "groceries")?;
//! note.save().await?;
//! assert_eq!(note.state(), LifecycleState::Reference);
//! assert!(note.active());
//! # Ok(())
//! # }
//! ```

mod memory;
mod remote;
mod store;

pub use memory::{HookCounts, MemoryStore};
pub use remote::{LifecycleState, RemoteRecord};
pub use store::RecordStore;

pub use recordkit_types::{Error, RecordId, Result};
