//! Shared fixtures for model tests.

#![allow(dead_code)]

use recordkit_model::{Schema, Type};
use serde_json::json;
use std::sync::Arc;

/// Field names of [`base_schema`] in declaration order.
pub const BASE_FIELDS: [&str; 11] = [
    "integer",
    "float",
    "string",
    "boolean",
    "object",
    "instance",
    "definedDefaultInteger",
    "definedDefaultFloat",
    "definedDefaultString",
    "definedDefaultBoolean",
    "definedDefaultObject",
];

/// JSON text of a fresh [`base_schema`] record.
pub const BASE_JSON: &str = concat!(
    r#"{"integer":0,"float":0,"string":null,"boolean":false,"object":null,"instance":null,"#,
    r#""definedDefaultInteger":-1,"definedDefaultFloat":-0.99,"definedDefaultString":"default string","#,
    r#""definedDefaultBoolean":true,"definedDefaultObject":{}}"#
);

/// One property of every scalar type, then the same types with declared defaults.
pub fn base_schema() -> Arc<Schema> {
    Schema::builder("BaseModel")
        .property("integer", Type::integer())
        .property("float", Type::float())
        .property("string", Type::string())
        .property("boolean", Type::boolean())
        .property("object", Type::object())
        .property("instance", Type::instance_of("Date"))
        .property_with_default("definedDefaultInteger", Type::integer(), -1)
        .property_with_default("definedDefaultFloat", Type::float(), -0.99)
        .property_with_default("definedDefaultString", Type::string(), "default string")
        .property_with_default("definedDefaultBoolean", Type::boolean(), true)
        .property_with_default("definedDefaultObject", Type::object(), json!({}))
        .build()
}
