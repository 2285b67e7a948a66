//! Core type definitions for recordkit.
//!
//! This crate defines the leaf types every other layer builds on:
//! - [`Value`]: the dynamic value domain fields are cast from and into
//! - [`ValueType`]: the cast/validate/default capability, with the built-in
//!   variants reachable through [`Type`] and [`TypeDef`]
//! - [`RecordId`]: identity of a persisted record
//! - [`Error`]: the error taxonomy shared by models and the record lifecycle

mod error;
mod ids;
pub mod types;
mod value;

pub use error::{Error, Result};
pub use ids::RecordId;
pub use types::{SharedType, Type, TypeDef, ValueType};
pub use value::{Instance, Map, Value};
