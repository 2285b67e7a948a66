//! Records with a persistence lifecycle.
//!
//! A [`RemoteRecord`] wraps a [`Record`] with an identity, timestamps and an
//! active flag, and drives a [`RecordStore`] through save, load and delete.
//! Its state is derived from whether an id is known and whether durable
//! fields have been loaded:
//!
//! | state       | id      | loaded |
//! |-------------|---------|--------|
//! | `New`       | none    | no     |
//! | `Reference` | known   | no     |
//! | `Loaded`    | known   | yes    |
//!
//! Operations on one instance must not run concurrently; distinct instances
//! share nothing but the store.

use crate::RecordStore;
use chrono::{DateTime, Utc};
use recordkit_model::{Projection, Record, Schema};
use recordkit_types::types::{BooleanType, DateType};
use recordkit_types::{Error, Map, RecordId, Result, Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle position of a [`RemoteRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Never persisted.
    New,
    /// Identity known, durable fields not read yet.
    Reference,
    /// Durable fields hydrated from the store.
    Loaded,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Reference => write!(f, "reference"),
            Self::Loaded => write!(f, "loaded"),
        }
    }
}

pub struct RemoteRecord {
    record: Record,
    id: Option<RecordId>,
    created_time: Option<DateTime<Utc>>,
    updated_time: Option<DateTime<Utc>>,
    active: bool,
    loaded: bool,
    store: Arc<dyn RecordStore>,
}

impl RemoteRecord {
    /// A record that has never been persisted.
    pub fn new(schema: Arc<Schema>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            record: Record::new(schema),
            id: None,
            created_time: None,
            updated_time: None,
            active: false,
            loaded: false,
            store,
        }
    }

    /// A reference to a persisted record whose fields have not been read.
    pub fn with_id(
        schema: Arc<Schema>,
        store: Arc<dyn RecordStore>,
        id: impl Into<RecordId>,
    ) -> Self {
        let mut record = Self::new(schema, store);
        record.id = Some(id.into());
        record
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        match (&self.id, self.loaded) {
            (None, _) => LifecycleState::New,
            (Some(_), false) => LifecycleState::Reference,
            (Some(_), true) => LifecycleState::Loaded,
        }
    }

    /// Name of the record's schema, used in lifecycle errors.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.record.schema().name()
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        self.record.schema()
    }

    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.record.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.record.set(name, value)
    }

    #[must_use]
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    #[must_use]
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_time
    }

    pub fn set_created_time(&mut self, time: Option<DateTime<Utc>>) {
        self.created_time = time;
    }

    #[must_use]
    pub fn updated_time(&self) -> Option<DateTime<Utc>> {
        self.updated_time
    }

    pub fn set_updated_time(&mut self, time: Option<DateTime<Utc>>) {
        self.updated_time = time;
    }

    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether durable fields have been read from the store.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Persists the record.
    ///
    /// A new record is committed, stamped and handed to the store's `create`,
    /// which assigns its id. The record is not marked loaded afterwards, so the
    /// next save reloads before updating. A reference is loaded first and then
    /// updated like a loaded record.
    pub async fn save(&mut self) -> Result<&mut Self> {
        let state = self.state();
        debug!("Saving {} record in state {}", self.class_name(), state);

        match state {
            LifecycleState::New => self.create().await?,
            LifecycleState::Reference => {
                self.load().await?;
                self.update().await?;
            }
            LifecycleState::Loaded => self.update().await?,
        }
        Ok(self)
    }

    async fn create(&mut self) -> Result<()> {
        self.record.commit();
        self.created_time = Some(Utc::now());
        self.active = true;

        let store = Arc::clone(&self.store);
        let id = store.create(self).await?;
        info!("Created {} {}", self.class_name(), id);
        self.id = Some(id);
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        self.record.commit();
        self.updated_time = Some(Utc::now());

        let store = Arc::clone(&self.store);
        store.update(self).await
    }

    /// Reads the durable state of the record from the store.
    ///
    /// Fails with [`Error::ObjectNotFound`] when the store has nothing under
    /// the id or only an inactive record.
    pub async fn load(&mut self) -> Result<&mut Self> {
        let id = self.require_id("load")?;
        let store = Arc::clone(&self.store);

        let Some(fields) = store.load(self, &id).await? else {
            warn!("{} {} not found", self.class_name(), id);
            return Err(self.not_found(id));
        };
        if !is_active(&fields) {
            warn!("{} {} is inactive", self.class_name(), id);
            return Err(self.not_found(id));
        }

        self.record.hydrate(&fields)?;
        self.loaded = true;
        self.created_time = timestamp(&fields, "created_time");
        self.updated_time = timestamp(&fields, "updated_time");
        self.active = true;
        debug!("Loaded {} {}", self.class_name(), id);
        Ok(self)
    }

    /// Deletes the record.
    ///
    /// A soft delete loads the record if needed, clears `active` and saves.
    /// A permanent delete goes straight to the store's `delete` and leaves
    /// the instance untouched; it should be discarded afterwards.
    pub async fn delete(&mut self, permanent: bool) -> Result<()> {
        let id = self.require_id("delete")?;

        if permanent {
            let store = Arc::clone(&self.store);
            store.delete(self, &id).await?;
            info!("Permanently deleted {} {}", self.class_name(), id);
            return Ok(());
        }

        if !self.loaded {
            self.load().await?;
        }
        self.active = false;
        self.save().await?;
        info!("Soft-deleted {} {}", self.class_name(), id);
        Ok(())
    }

    /// Projection of the record: `id`, the declared fields (optionally
    /// filtered), then `created_time`, `updated_time` and `active`.
    ///
    /// The lifecycle fields are added after filtering and always present.
    #[must_use]
    pub fn project(&self, fields: Option<&[&str]>) -> Projection {
        let mut projection = Projection::new();
        projection.insert("id", self.id.clone());
        for (name, value) in self.record.project(fields) {
            projection.insert(name, value);
        }
        projection.insert("created_time", self.created_time);
        projection.insert("updated_time", self.updated_time);
        projection.insert("active", self.active);
        projection
    }

    #[must_use]
    pub fn project_all(&self) -> Projection {
        self.project(None)
    }

    /// JSON text of [`RemoteRecord::project_all`].
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.project_all())?)
    }

    fn require_id(&self, operation: &str) -> Result<RecordId> {
        self.id.clone().ok_or_else(|| {
            Error::UnsupportedOperation(format!(
                "cannot {operation} {} without an id",
                self.class_name()
            ))
        })
    }

    fn not_found(&self, id: RecordId) -> Error {
        Error::ObjectNotFound {
            class: self.class_name().to_string(),
            id,
        }
    }
}

fn is_active(fields: &Map) -> bool {
    let raw = fields.get("active").unwrap_or(&Value::Undefined);
    matches!(BooleanType.cast(raw), Ok(Value::Bool(true)))
}

fn timestamp(fields: &Map, name: &str) -> Option<DateTime<Utc>> {
    fields.get(name).and_then(DateType::cast_timestamp)
}

impl fmt::Debug for RemoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRecord")
            .field("class", &self.class_name())
            .field("id", &self.id)
            .field("state", &self.state())
            .field("active", &self.active)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RemoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.serialize().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
