//! Records: typed field values layered over a schema.
//!
//! A record keeps two maps. `committed` is the durable state as of the last
//! [`Record::commit`]; `pending` holds writes made since. Reads see pending
//! first, then committed, then the property default, so every declared field
//! reads as a type-correct value even on a fresh record.

use crate::{Property, Schema};
use chrono::{DateTime, Utc};
use recordkit_types::{Error, Map, Result, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Field values of one instance of a [`Schema`], split into committed and pending.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    committed: HashMap<String, Value>,
    pending: HashMap<String, Value>,
}

impl Record {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            committed: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    fn property(&self, name: &str) -> Result<&Property> {
        self.schema.property(name).ok_or_else(|| {
            Error::UnsupportedOperation(format!(
                "invalid property key `{name}` for {}",
                self.schema.name()
            ))
        })
    }

    /// Current value of `name`: pending, else committed, else the default.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let property = self.property(name)?;
        Ok(self
            .pending
            .get(name)
            .or_else(|| self.committed.get(name))
            .unwrap_or_else(|| property.default_value()))
    }

    /// Durable value of `name`, ignoring pending writes.
    pub fn committed_value(&self, name: &str) -> Result<&Value> {
        let property = self.property(name)?;
        Ok(self
            .committed
            .get(name)
            .unwrap_or_else(|| property.default_value()))
    }

    /// Casts `value` through the property's type and stages it as pending.
    /// On a failed cast neither map changes.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let property = self.property(name)?;
        let cast = property.cast(&value.into())?;
        let key = property.name().to_string();
        self.pending.insert(key, cast);
        Ok(())
    }

    /// Moves every pending write into the committed state.
    pub fn commit(&mut self) {
        self.committed.extend(self.pending.drain());
    }

    /// True if there are uncommitted writes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Names of fields with uncommitted writes, in declaration order.
    pub fn pending_fields(&self) -> impl Iterator<Item = &str> {
        self.schema
            .property_names()
            .filter(|name| self.pending.contains_key(*name))
    }

    /// Replaces committed values with the declared fields found in `fields`.
    ///
    /// Every present field is cast first; if any cast fails nothing is
    /// written. Undeclared keys are ignored and pending writes are kept.
    pub fn hydrate(&mut self, fields: &Map) -> Result<()> {
        let mut hydrated = Vec::new();
        for property in self.schema.properties() {
            if let Some(raw) = fields.get(property.name()) {
                hydrated.push((property.name().to_string(), property.cast(raw)?));
            }
        }
        self.committed.extend(hydrated);
        Ok(())
    }

    /// Current values of the declared fields, in declaration order.
    ///
    /// A non-empty `fields` restricts the projection to those names; `None`
    /// or an empty slice projects everything.
    #[must_use]
    pub fn project(&self, fields: Option<&[&str]>) -> Projection {
        let filter = fields.filter(|f| !f.is_empty());
        let mut projection = Projection::new();
        for property in self.schema.properties() {
            let name = property.name();
            if filter.is_some_and(|f| !f.iter().any(|field| *field == name)) {
                continue;
            }
            let value = self
                .pending
                .get(name)
                .or_else(|| self.committed.get(name))
                .unwrap_or_else(|| property.default_value());
            projection.insert(name, value.clone());
        }
        projection
    }

    #[must_use]
    pub fn project_all(&self) -> Projection {
        self.project(None)
    }

    /// JSON text of [`Record::project_all`].
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.project_all())?)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).ok().and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).ok().and_then(Value::as_f64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).ok().and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).ok().and_then(Value::as_bool)
    }

    pub fn get_date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).ok().and_then(Value::as_date).copied()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.serialize().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Field name to value pairs in declaration order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    entries: Vec<(String, Value)>,
}

impl Projection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an existing entry in place or appending.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts into an unordered map, the form storage collaborators keep.
    #[must_use]
    pub fn into_map(self) -> Map {
        self.entries.into_iter().collect()
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl IntoIterator for Projection {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
