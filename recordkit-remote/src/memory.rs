//! In-process [`RecordStore`] keeping projections in a map.

use crate::{RecordStore, RemoteRecord};
use async_trait::async_trait;
use recordkit_types::{Error, Map, RecordId, Result, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// How many times each hook has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookCounts {
    pub create: usize,
    pub load: usize,
    pub update: usize,
    pub delete: usize,
}

#[derive(Debug, Default)]
struct Counters {
    create: AtomicUsize,
    load: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

/// Stores every record as the map form of its projection, keyed by id.
///
/// Ids are sequential integers starting at 1. Soft-deleted records stay in
/// the map with `active` false; permanently deleted ones are removed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<RecordId, Map>>,
    next_id: AtomicI64,
    calls: Counters,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw fields under `id`, bypassing the lifecycle.
    pub async fn insert_raw(&self, id: impl Into<RecordId>, fields: Map) {
        self.rows.write().await.insert(id.into(), fields);
    }

    /// Raw fields stored under `id`.
    pub async fn get_raw(&self, id: &RecordId) -> Option<Map> {
        self.rows.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    #[must_use]
    pub fn calls(&self) -> HookCounts {
        HookCounts {
            create: self.calls.create.load(Ordering::Relaxed),
            load: self.calls.load.load(Ordering::Relaxed),
            update: self.calls.update.load(Ordering::Relaxed),
            delete: self.calls.delete.load(Ordering::Relaxed),
        }
    }

    fn row(record: &RemoteRecord, id: &RecordId) -> Map {
        let mut row = record.project_all().into_map();
        row.insert("id".to_string(), Value::from(id.clone()));
        row
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, record: &RemoteRecord) -> Result<RecordId> {
        self.calls.create.fetch_add(1, Ordering::Relaxed);
        let id = RecordId::Int(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let row = Self::row(record, &id);
        self.rows.write().await.insert(id.clone(), row);
        debug!("Stored new {} row {}", record.class_name(), id);
        Ok(id)
    }

    async fn load(&self, _record: &RemoteRecord, id: &RecordId) -> Result<Option<Map>> {
        self.calls.load.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn update(&self, record: &RemoteRecord) -> Result<()> {
        self.calls.update.fetch_add(1, Ordering::Relaxed);
        let id = record
            .id()
            .ok_or_else(|| Error::Storage(format!("{} has no id to update", record.class_name())))?;
        let row = Self::row(record, id);
        self.rows.write().await.insert(id.clone(), row);
        Ok(())
    }

    async fn delete(&self, record: &RemoteRecord, id: &RecordId) -> Result<()> {
        self.calls.delete.fetch_add(1, Ordering::Relaxed);
        if self.rows.write().await.remove(id).is_none() {
            debug!("No {} row {} to delete", record.class_name(), id);
        }
        Ok(())
    }
}
