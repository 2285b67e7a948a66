//! Typed record model for recordkit.
//!
//! - [`Property`]: a field name bound to a value type, requiredness and default
//! - [`Schema`] / [`SchemaBuilder`]: a model's effective property list,
//!   parent properties first
//! - [`SchemaRegistry`] / [`SchemaDef`]: schemas by name, declared in code or
//!   loaded from configuration documents
//! - [`Record`]: committed and pending field values over a schema, with
//!   typed reads and an ordered [`Projection`]

mod property;
mod record;
mod schema;

pub use property::Property;
pub use record::{Projection, Record};
pub use schema::{PropertyDef, Schema, SchemaBuilder, SchemaDef, SchemaRegistry};

pub use recordkit_types::{Error, Result, Type, Value};
