//! Shared fixtures for lifecycle tests.

#![allow(dead_code)]

use recordkit_model::{Schema, Type};
use recordkit_remote::{MemoryStore, RemoteRecord};
use recordkit_types::{Map, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Routes lifecycle logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `Note { title: String, views: Integer }`.
pub fn note_schema() -> Arc<Schema> {
    Schema::builder("Note")
        .property("title", Type::string())
        .property("views", Type::integer())
        .build()
}

pub fn new_note(store: &Arc<MemoryStore>) -> RemoteRecord {
    RemoteRecord::new(note_schema(), store.clone())
}

/// Converts a JSON object literal into raw stored fields.
pub fn fields(value: serde_json::Value) -> Map {
    match Value::from(value) {
        Value::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}
