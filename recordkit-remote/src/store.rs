//! Storage collaborator interface.
//!
//! Defines the four hooks the record lifecycle drives.

use crate::RemoteRecord;
use async_trait::async_trait;
use recordkit_types::{Error, Map, RecordId, Result};

/// Persistence hooks implemented by a storage backend.
///
/// Every hook fails with [`Error::NotImplemented`] unless overridden, naming
/// the record's schema and the missing hook. A backend overrides exactly the
/// operations it supports.
///
/// Hooks are awaited to completion before the lifecycle takes its next step
/// and their errors are returned unchanged. Cancellation and timeouts are the
/// backend's concern.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record and returns the identity assigned to it.
    ///
    /// Called with pending fields already committed and `created_time` and
    /// `active` already stamped.
    async fn create(&self, record: &RemoteRecord) -> Result<RecordId> {
        Err(Error::not_implemented(record.class_name(), "create"))
    }

    /// Fetches the raw fields stored under `id`, or `None` if there are none.
    ///
    /// The map should carry `active`, `created_time` and `updated_time`
    /// next to the declared fields.
    async fn load(&self, record: &RemoteRecord, _id: &RecordId) -> Result<Option<Map>> {
        Err(Error::not_implemented(record.class_name(), "load"))
    }

    /// Writes the record's current state over the stored one.
    async fn update(&self, record: &RemoteRecord) -> Result<()> {
        Err(Error::not_implemented(record.class_name(), "update"))
    }

    /// Removes the record stored under `id`.
    async fn delete(&self, record: &RemoteRecord, _id: &RecordId) -> Result<()> {
        Err(Error::not_implemented(record.class_name(), "delete"))
    }
}
