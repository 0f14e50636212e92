//! # entity-rs
//!
//! Validate datastore entities against declarative schemas.
//!
//! ## Quick Start
//!
//! ```rust
//! use entity_rs::prelude::*;
//!
//! # fn main() -> Result<(), SchemaError> {
//! let schema: Schema = r#"{
//!     "properties": {
//!         "name": { "type": "string", "required": true },
//!         "website": { "validate": "isURL" },
//!         "birthday": { "type": "datetime" }
//!     },
//!     "virtuals": ["fullName"]
//! }"#
//! .parse()?;
//!
//! let mut data = entity!({
//!     "name": "John",
//!     "website": "https://github.com",
//!     "birthday": "2015-01-01",
//!     "fullName": "John Snow"
//! });
//!
//! let result = validate(&mut data, &schema, "User");
//! assert!(result.is_valid());
//! assert!(!data.contains_key("fullName"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - [`entity_core`]: the value model (`Value`, `Map`, tagged wrappers)
//! - [`entity_validate`]: schemas, the rule library and the validation engine

// Re-export the member crates
pub use entity_core;
pub use entity_validate;

pub use entity_core::{entity, Coercible, CoreError, DoubleValue, GeoPoint, IntegerValue, Map, Value};
pub use entity_validate::{
    validate, ErrorKind, LibraryRule, PropertyDefinition, PropertyType, Rule, RuleLibrary, Schema,
    SchemaError, SchemaLoader, SchemaOptions, SchemaResult, SchemaValidator, ValidationError,
    ValidationResult, Violation,
};

// Re-export common dependencies
pub use bytes::Bytes;
pub use chrono;
pub use serde_json;

/// Prelude module - import everything you need with `use entity_rs::prelude::*`
pub mod prelude {
    pub use entity_core::{entity, DoubleValue, GeoPoint, IntegerValue, Map, Value};
    pub use entity_validate::prelude::*;

    pub use bytes::Bytes;
    pub use serde_json::json;
}
