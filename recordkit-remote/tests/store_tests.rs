mod common;

use async_trait::async_trait;
use common::{fields, note_schema};
use recordkit_remote::{Error, LifecycleState, RecordId, RecordStore, RemoteRecord, Result};
use recordkit_types::Map;
use serde_json::json;
use std::sync::Arc;

/// A backend that overrides nothing.
struct Bare;

#[async_trait]
impl RecordStore for Bare {}

/// A read-only backend: every id resolves to the same active record.
struct ReadOnly;

#[async_trait]
impl RecordStore for ReadOnly {
    async fn load(&self, _record: &RemoteRecord, _id: &RecordId) -> Result<Option<Map>> {
        Ok(Some(fields(json!({"title": "fixed", "active": true}))))
    }
}

/// A backend that mints UUID ids.
struct Minting;

#[async_trait]
impl RecordStore for Minting {
    async fn create(&self, _record: &RemoteRecord) -> Result<RecordId> {
        Ok(RecordId::generate())
    }
}

/// A backend whose writes fail after reads succeed.
struct Rejecting;

#[async_trait]
impl RecordStore for Rejecting {
    async fn load(&self, _record: &RemoteRecord, _id: &RecordId) -> Result<Option<Map>> {
        Ok(Some(fields(json!({"active": true}))))
    }

    async fn update(&self, _record: &RemoteRecord) -> Result<()> {
        Err(Error::Storage("disk full".into()))
    }
}

fn assert_not_implemented(err: Error, expected: &str) {
    match err {
        Error::NotImplemented { class, method } => {
            assert_eq!(class, "Note");
            assert_eq!(method, expected);
        }
        other => panic!("expected NotImplemented for {expected}, got {other:?}"),
    }
}

// ── Fail-closed hooks ────────────────────────────────────────────

#[tokio::test]
async fn create_is_not_implemented_by_default() {
    let mut note = RemoteRecord::new(note_schema(), Arc::new(Bare));
    let err = note.save().await.unwrap_err();
    assert_eq!(err.to_string(), "method create of Note not implemented");
    assert_not_implemented(err, "create");
    assert_eq!(note.state(), LifecycleState::New);
}

#[tokio::test]
async fn load_is_not_implemented_by_default() {
    let mut note = RemoteRecord::with_id(note_schema(), Arc::new(Bare), 1_i64);
    assert_not_implemented(note.load().await.unwrap_err(), "load");
}

#[tokio::test]
async fn update_is_not_implemented_by_default() {
    let mut note = RemoteRecord::with_id(note_schema(), Arc::new(ReadOnly), 1_i64);
    let err = note.save().await.unwrap_err();
    assert_not_implemented(err, "update");
    // the load that preceded the update still went through
    assert!(note.is_loaded());
    assert_eq!(note.record().get_str("title"), Some("fixed"));
}

#[tokio::test]
async fn delete_is_not_implemented_by_default() {
    let mut note = RemoteRecord::with_id(note_schema(), Arc::new(Bare), 1_i64);
    assert_not_implemented(note.delete(true).await.unwrap_err(), "delete");
}

#[tokio::test]
async fn soft_delete_surfaces_missing_load() {
    let mut note = RemoteRecord::with_id(note_schema(), Arc::new(Bare), 1_i64);
    assert_not_implemented(note.delete(false).await.unwrap_err(), "load");
    assert!(!note.active());
}

// ── Backend-defined behavior ─────────────────────────────────────

#[tokio::test]
async fn create_hook_assigns_the_id() {
    let mut note = RemoteRecord::new(note_schema(), Arc::new(Minting));
    note.save().await.unwrap();

    let id = note.id().and_then(RecordId::as_text).unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(note.state(), LifecycleState::Reference);
}

#[tokio::test]
async fn storage_errors_propagate_unchanged() {
    let mut note = RemoteRecord::with_id(note_schema(), Arc::new(Rejecting), 1_i64);
    note.set("title", "unsaved").unwrap();

    let err = note.save().await.unwrap_err();
    assert_eq!(err.kind(), "storage");
    assert_eq!(err.to_string(), "storage error: disk full");
}
