use crate::Property;
use recordkit_types::{Error, Result, SharedType, TypeDef, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The declared shape of a model: its name and effective property list.
///
/// The effective list is the parent's effective list, in the parent's order,
/// followed by this schema's own declarations. A declaration reusing an
/// existing name replaces the earlier property at the earlier position, so
/// names are unique within the list. It is computed once, when the schema is
/// built, and never changes afterwards.
#[derive(Debug)]
pub struct Schema {
    name: String,
    parent: Option<Arc<Schema>>,
    own: Vec<Property>,
    properties: Vec<Property>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Starts declaring a schema named `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Schema>> {
        self.parent.as_ref()
    }

    /// Effective properties, parent first.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Properties declared on this schema itself.
    #[must_use]
    pub fn own_properties(&self) -> &[Property] {
        &self.own
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.index.get(name).map(|&at| &self.properties[at])
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(Property::name)
    }

    /// True if this schema is `name` or descends from a schema named `name`.
    #[must_use]
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.parent.as_ref().is_some_and(|p| p.is_a(name))
    }
}

/// Chainable declaration of a [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    parent: Option<Arc<Schema>>,
    properties: Vec<Property>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            properties: Vec::new(),
        }
    }

    /// Inherits every property of `parent`.
    #[must_use]
    pub fn extends(mut self, parent: &Arc<Schema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declares a property with full control over requiredness and default.
    #[must_use]
    pub fn declare(
        mut self,
        name: impl Into<String>,
        value_type: SharedType,
        required: bool,
        default: impl Into<Value>,
    ) -> Self {
        self.properties
            .push(Property::new(name, value_type, required, default));
        self
    }

    /// Declares an optional property defaulting to the type's zero value.
    #[must_use]
    pub fn property(self, name: impl Into<String>, value_type: SharedType) -> Self {
        self.declare(name, value_type, false, Value::Null)
    }

    /// Declares an optional property with a default.
    #[must_use]
    pub fn property_with_default(
        self,
        name: impl Into<String>,
        value_type: SharedType,
        default: impl Into<Value>,
    ) -> Self {
        self.declare(name, value_type, false, default)
    }

    /// Declares a required property.
    #[must_use]
    pub fn required(self, name: impl Into<String>, value_type: SharedType) -> Self {
        self.declare(name, value_type, true, Value::Null)
    }

    /// Starts a builder from a configuration document.
    ///
    /// `parent` must be the schema `def.extends` names; resolving that name is
    /// left to the caller (see [`SchemaRegistry::register_def`]).
    pub fn from_def(def: &SchemaDef, parent: Option<&Arc<Schema>>) -> Result<Self> {
        let mut builder = Self::new(&def.name);
        if let Some(parent) = parent {
            builder = builder.extends(parent);
        }
        for property in &def.properties {
            let value_type = property.value_type.resolve(&property.default)?;
            builder = builder.declare(
                &property.name,
                value_type,
                property.required,
                property.default.clone(),
            );
        }
        Ok(builder)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Computes the effective property list and freezes the schema.
    #[must_use]
    pub fn build(self) -> Arc<Schema> {
        let mut properties: Vec<Property> = self
            .parent
            .as_ref()
            .map(|parent| parent.properties.clone())
            .unwrap_or_default();
        for property in &self.properties {
            match properties.iter().position(|p| p.name() == property.name()) {
                Some(at) => properties[at] = property.clone(),
                None => properties.push(property.clone()),
            }
        }
        let index = properties
            .iter()
            .enumerate()
            .map(|(at, p)| (p.name().to_string(), at))
            .collect();

        Arc::new(Schema {
            name: self.name,
            parent: self.parent,
            own: self.properties,
            properties,
            index,
        })
    }
}

/// Configuration form of a schema.
///
/// ```json
/// { "name": "Article", "extends": "Base",
///   "properties": [ { "name": "title", "type": "string", "required": true } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

impl SchemaDef {
    /// Parses a schema document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration form of a property. The type fields (`type`, `kind`,
/// `values`) sit inline next to the property fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(flatten)]
    pub value_type: TypeDef,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "null_default")]
    pub default: Value,
}

fn null_default() -> Value {
    Value::Null
}

/// Schemas by name, registered once before records are created.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and registers a schema. Fails if the name is already taken.
    pub fn register(&mut self, builder: SchemaBuilder) -> Result<Arc<Schema>> {
        if self.schemas.contains_key(builder.name()) {
            return Err(Error::UnsupportedOperation(format!(
                "schema `{}` is already registered",
                builder.name()
            )));
        }
        let schema = builder.build();
        self.schemas
            .insert(schema.name().to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Registers a schema from its configuration form, resolving `extends`
    /// against the schemas registered so far.
    pub fn register_def(&mut self, def: &SchemaDef) -> Result<Arc<Schema>> {
        let parent = match def.extends.as_deref() {
            Some(name) => Some(self.get(name).ok_or_else(|| {
                Error::UnsupportedOperation(format!(
                    "schema `{}` extends unknown schema `{name}`",
                    def.name
                ))
            })?),
            None => None,
        };
        self.register(SchemaBuilder::from_def(def, parent.as_ref())?)
    }

    /// Parses and registers a schema document.
    pub fn register_json(&mut self, json: &str) -> Result<Arc<Schema>> {
        self.register_def(&SchemaDef::from_json(json)?)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
