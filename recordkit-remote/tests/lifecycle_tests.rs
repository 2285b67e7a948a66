mod common;

use chrono::{TimeZone, Utc};
use common::{fields, init_tracing, new_note, note_schema};
use pretty_assertions::assert_eq;
use recordkit_remote::{Error, HookCounts, LifecycleState, MemoryStore, RecordId, RemoteRecord};
use recordkit_model::{Schema, Type};
use recordkit_types::Value;
use serde_json::json;
use std::sync::Arc;

/// Persists a note through the lifecycle and returns its id.
async fn seeded(store: &Arc<MemoryStore>, title: &str) -> RecordId {
    let mut note = new_note(store);
    note.set("title", title).unwrap();
    note.save().await.unwrap();
    note.id().cloned().unwrap()
}

// ── States ───────────────────────────────────────────────────────

#[test]
fn state_follows_id_and_loaded() {
    let store = Arc::new(MemoryStore::new());
    assert_eq!(new_note(&store).state(), LifecycleState::New);

    let reference = RemoteRecord::with_id(note_schema(), store.clone(), 7_i64);
    assert_eq!(reference.state(), LifecycleState::Reference);
    assert_eq!(reference.id(), Some(&RecordId::Int(7)));
    assert!(!reference.active());
    assert_eq!(LifecycleState::Loaded.to_string(), "loaded");
}

// ── Create ───────────────────────────────────────────────────────

#[tokio::test]
async fn save_on_new_record_creates_it() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let mut note = new_note(&store);
    note.set("title", "groceries").unwrap();

    note.save().await.unwrap();

    assert_eq!(store.calls(), HookCounts { create: 1, ..Default::default() });
    assert!(note.active());
    assert!(note.created_time().is_some());
    assert_eq!(note.updated_time(), None);
    assert_eq!(note.id(), Some(&RecordId::Int(1)));
    assert!(!note.record().is_dirty());
}

#[tokio::test]
async fn create_persists_committed_fields_and_stamps() {
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "groceries").await;

    let row = store.get_raw(&id).await.unwrap();
    assert_eq!(row["title"], Value::from("groceries"));
    assert_eq!(row["views"], Value::Int(0));
    assert_eq!(row["active"], Value::Bool(true));
    assert!(row["created_time"].as_date().is_some());
    assert_eq!(row["updated_time"], Value::Null);
    assert_eq!(row["id"], Value::Int(1));
}

#[tokio::test]
async fn ids_are_sequential() {
    let store = Arc::new(MemoryStore::new());
    assert_eq!(seeded(&store, "a").await, RecordId::Int(1));
    assert_eq!(seeded(&store, "b").await, RecordId::Int(2));
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn created_record_is_not_marked_loaded() {
    let store = Arc::new(MemoryStore::new());
    let mut note = new_note(&store);
    note.save().await.unwrap();

    assert!(!note.is_loaded());
    assert_eq!(note.state(), LifecycleState::Reference);

    // the second save reloads before updating
    note.set("views", 3).unwrap();
    note.save().await.unwrap();
    assert_eq!(
        store.calls(),
        HookCounts { create: 1, load: 1, update: 1, delete: 0 }
    );
    assert_eq!(note.state(), LifecycleState::Loaded);
    assert!(note.updated_time().is_some());
    assert_eq!(note.record().get_i64("views"), Some(3));
}

// ── Load ─────────────────────────────────────────────────────────

#[tokio::test]
async fn load_hydrates_fields_and_lifecycle_values() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_raw(
            4_i64,
            fields(json!({
                "title": "stored",
                "views": "12",
                "active": 1,
                "created_time": "2024-01-02T03:04:05Z",
                "updated_time": null,
                "unknown": "ignored"
            })),
        )
        .await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), 4_i64);
    note.load().await.unwrap();

    assert_eq!(note.state(), LifecycleState::Loaded);
    assert_eq!(note.record().get_str("title"), Some("stored"));
    assert_eq!(note.record().get_i64("views"), Some(12));
    assert!(note.active());
    assert_eq!(
        note.created_time(),
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    );
    assert_eq!(note.updated_time(), None);
    assert!(!note.record().is_dirty());
}

#[tokio::test]
async fn load_of_inactive_record_is_not_found() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    store
        .insert_raw(1_i64, fields(json!({"title": "gone", "active": false})))
        .await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), 1_i64);
    let err = note.load().await.unwrap_err();

    match err {
        Error::ObjectNotFound { class, id } => {
            assert_eq!(class, "Note");
            assert_eq!(id, RecordId::Int(1));
        }
        other => panic!("expected ObjectNotFound, got {other:?}"),
    }
    assert_eq!(note.state(), LifecycleState::Reference);
}

#[tokio::test]
async fn active_flag_is_cast_as_boolean() {
    let store = Arc::new(MemoryStore::new());
    store.insert_raw(1_i64, fields(json!({"active": "false"}))).await;
    store.insert_raw(2_i64, fields(json!({"title": "no flag"}))).await;
    store.insert_raw(3_i64, fields(json!({"active": "yes"}))).await;

    for (id, found) in [(1_i64, false), (2, false), (3, true)] {
        let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id);
        assert_eq!(note.load().await.is_ok(), found, "id {id}");
    }
}

#[tokio::test]
async fn load_of_unknown_id_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), "missing");
    let err = note.load().await.unwrap_err();
    assert_eq!(err.kind(), "object_not_found");
    assert_eq!(err.to_string(), "instance of Note with id missing not found");
}

#[tokio::test]
async fn load_without_id_is_unsupported() {
    let store = Arc::new(MemoryStore::new());
    let mut note = new_note(&store);
    let err = note.load().await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));
    assert_eq!(store.calls(), HookCounts::default());
}

#[tokio::test]
async fn load_rejects_uncastable_stored_fields() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_raw(1_i64, fields(json!({"views": "many", "active": true})))
        .await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), 1_i64);
    assert!(note.load().await.unwrap_err().is_invalid_cast());
    assert!(!note.is_loaded());
}

// ── Update ───────────────────────────────────────────────────────

#[tokio::test]
async fn save_on_loaded_record_updates() {
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "draft").await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id.clone());
    note.load().await.unwrap();
    note.set("title", "final").unwrap();
    note.save().await.unwrap();

    assert_eq!(store.calls().load, 1);
    assert_eq!(store.calls().update, 1);
    assert!(note.updated_time().is_some());
    assert!(!note.record().is_dirty());

    let row = store.get_raw(&id).await.unwrap();
    assert_eq!(row["title"], Value::from("final"));
    assert!(row["updated_time"].as_date().is_some());
}

#[tokio::test]
async fn save_on_reference_loads_first() {
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "stored").await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id.clone());
    note.set("views", 9).unwrap();
    note.save().await.unwrap();

    assert_eq!(note.state(), LifecycleState::Loaded);
    assert_eq!(note.record().get_str("title"), Some("stored"));
    let row = store.get_raw(&id).await.unwrap();
    assert_eq!(row["views"], Value::Int(9));
    assert_eq!(row["title"], Value::from("stored"));
}

// ── Delete ───────────────────────────────────────────────────────

#[tokio::test]
async fn soft_delete_deactivates_and_hides_record() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "temporary").await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id.clone());
    note.delete(false).await.unwrap();

    assert!(!note.active());
    assert_eq!(
        store.calls(),
        HookCounts { create: 1, load: 1, update: 1, delete: 0 }
    );
    let row = store.get_raw(&id).await.unwrap();
    assert_eq!(row["active"], Value::Bool(false));
    assert_eq!(row["title"], Value::from("temporary"));

    let mut again = RemoteRecord::with_id(note_schema(), store.clone(), id);
    assert_eq!(again.load().await.unwrap_err().kind(), "object_not_found");
}

#[tokio::test]
async fn soft_delete_of_loaded_record_skips_reload() {
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "loaded").await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id);
    note.load().await.unwrap();
    note.delete(false).await.unwrap();

    assert_eq!(store.calls().load, 1);
    assert_eq!(store.calls().update, 1);
}

#[tokio::test]
async fn permanent_delete_removes_record() {
    let store = Arc::new(MemoryStore::new());
    let id = seeded(&store, "doomed").await;

    let mut note = RemoteRecord::with_id(note_schema(), store.clone(), id.clone());
    note.delete(true).await.unwrap();

    assert_eq!(
        store.calls(),
        HookCounts { create: 1, load: 0, update: 0, delete: 1 }
    );
    assert!(store.get_raw(&id).await.is_none());
    assert!(store.is_empty().await);

    let mut again = RemoteRecord::with_id(note_schema(), store.clone(), id);
    assert_eq!(again.load().await.unwrap_err().kind(), "object_not_found");
}

#[tokio::test]
async fn delete_without_id_is_unsupported() {
    let store = Arc::new(MemoryStore::new());
    let mut note = new_note(&store);

    for permanent in [false, true] {
        let err = note.delete(permanent).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
    }
    assert_eq!(store.calls(), HookCounts::default());
}

#[tokio::test]
async fn unassigned_instance_field_survives_storage_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let schema = Schema::builder("Post")
        .property("title", Type::string())
        .property("author", Type::instance_of("User"))
        .build();

    let mut post = RemoteRecord::new(schema.clone(), store.clone());
    post.set("title", "hello").unwrap();
    post.save().await.unwrap();
    let id = post.id().cloned().unwrap();
    assert_eq!(store.get_raw(&id).await.unwrap()["author"], Value::Null);

    let mut loaded = RemoteRecord::with_id(schema.clone(), store.clone(), id.clone());
    loaded.load().await.unwrap();
    assert_eq!(loaded.get("author").unwrap(), &Value::Null);
    assert_eq!(loaded.record().get_str("title"), Some("hello"));

    let mut doomed = RemoteRecord::with_id(schema, store.clone(), id.clone());
    doomed.delete(false).await.unwrap();
    assert_eq!(store.get_raw(&id).await.unwrap()["active"], Value::Bool(false));
}

// ── Projection ───────────────────────────────────────────────────

#[test]
fn projection_wraps_fields_with_lifecycle_values() {
    let store = Arc::new(MemoryStore::new());
    let note = new_note(&store);

    assert_eq!(
        note.project_all().keys().collect::<Vec<_>>(),
        vec!["id", "title", "views", "created_time", "updated_time", "active"]
    );
    assert_eq!(
        note.serialize().unwrap(),
        r#"{"id":null,"title":null,"views":0,"created_time":null,"updated_time":null,"active":false}"#
    );
}

#[test]
fn field_filter_never_drops_lifecycle_values() {
    let store = Arc::new(MemoryStore::new());
    let note = RemoteRecord::with_id(note_schema(), store, "abc");

    let projection = note.project(Some(&["views"]));
    assert_eq!(
        projection.keys().collect::<Vec<_>>(),
        vec!["id", "views", "created_time", "updated_time", "active"]
    );
    assert_eq!(projection.get("id"), Some(&Value::from("abc")));
}

#[tokio::test]
async fn projection_after_create_carries_timestamp() {
    let store = Arc::new(MemoryStore::new());
    let mut note = new_note(&store);
    note.save().await.unwrap();

    let text = note.to_string();
    assert!(text.starts_with(r#"{"id":1,"title":null,"views":0,"created_time":""#));
    assert!(text.ends_with(r#","updated_time":null,"active":true}"#));
}
