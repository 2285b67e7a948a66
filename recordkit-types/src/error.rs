//! Error types shared by every recordkit layer.

use crate::RecordId;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by value casting, schema declaration and the record lifecycle.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was rejected by a value type's cast.
    #[error("value {value} cannot be cast to {type_name}")]
    InvalidCast { value: String, type_name: String },

    /// An operation that the current state or declaration does not allow.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A persistence hook was not provided by the storage collaborator.
    #[error("method {method} of {class} not implemented")]
    NotImplemented { class: String, method: &'static str },

    /// A load found no record, or only an inactive one.
    #[error("instance of {class} with id {id} not found")]
    ObjectNotFound { class: String, id: RecordId },

    /// Failure reported by the storage collaborator.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Builds an [`Error::InvalidCast`] for `value` rejected by the type named `type_name`.
    pub fn invalid_cast(value: &crate::Value, type_name: &str) -> Self {
        Self::InvalidCast {
            value: value.to_text(),
            type_name: type_name.to_lowercase(),
        }
    }

    /// Builds an [`Error::NotImplemented`] for a missing hook.
    pub fn not_implemented(class: impl Into<String>, method: &'static str) -> Self {
        Self::NotImplemented {
            class: class.into(),
            method,
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCast { .. } => "invalid_cast",
            Self::UnsupportedOperation(_) => "unsupported_operation",
            Self::NotImplemented { .. } => "not_implemented",
            Self::ObjectNotFound { .. } => "object_not_found",
            Self::Storage(_) => "storage",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Returns true if this is an [`Error::InvalidCast`].
    #[must_use]
    pub const fn is_invalid_cast(&self) -> bool {
        matches!(self, Self::InvalidCast { .. })
    }
}
