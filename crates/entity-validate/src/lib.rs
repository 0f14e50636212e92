//! # Entity Validate
//!
//! Schema-driven validation of entity data. A [`Schema`] declares the
//! properties an entity kind may carry; [`validate`] judges a data map
//! against it and reports every violation in one [`ValidationError`].
//!
//! ## Example
//!
//! ```rust
//! use entity_core::entity;
//! use entity_validate::prelude::*;
//!
//! let schema = Schema::new()
//!     .property("name", PropertyDefinition::typed(PropertyType::String).required())
//!     .property("email", PropertyDefinition::new().validate(Rule::named("isEmail")?));
//!
//! let mut data = entity!({ "name": 123, "email": "john@snow" });
//! let error = validate(&mut data, &schema, "User").error.unwrap();
//!
//! assert_eq!(error.codes(), vec![ErrorKind::PropType, ErrorKind::PropValue]);
//! # Ok::<(), SchemaError>(())
//! ```
//!
//! ## Checks
//!
//! For each property present in the data:
//!
//! - `explicitOnly` schemas reject undeclared keys (`ERR_PROP_NOT_ALLOWED`)
//! - absent, null and blank values fail only when required (`ERR_PROP_REQUIRED`)
//!   and skip every other check
//! - `type` must match the value's shape (`ERR_PROP_TYPE`)
//! - `values` must contain the value (`ERR_PROP_IN_RANGE`)
//! - `validate` must accept it (`ERR_PROP_VALUE`)
//!
//! Virtual properties are removed from the data before any check.
//!
//! ## Error Format
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "kind": "User",
//!     "message": "Property \"name\" must be a string.",
//!     "errors": [
//!       {"code": "ERR_PROP_TYPE", "property": "name", "message": "Property \"name\" must be a string.",
//!        "params": {"expected": "string", "actual": "number"}}
//!     ]
//!   }
//! }
//! ```

mod checks;
mod engine;
mod error;
mod loader;
pub mod rules;
mod schema;

pub use engine::{validate, SchemaValidator, ValidationResult};
pub use error::{ErrorKind, SchemaError, SchemaResult, ValidationError, Violation};
pub use loader::SchemaLoader;
pub use rules::{LibraryRule, Predicate, Rule, RuleLibrary};
pub use schema::{PropertyDefinition, PropertyType, Schema, SchemaOptions};

/// Prelude module for validation
pub mod prelude {
    pub use crate::engine::{validate, SchemaValidator, ValidationResult};
    pub use crate::error::{ErrorKind, SchemaError, ValidationError, Violation};
    pub use crate::loader::SchemaLoader;
    pub use crate::rules::{Rule, RuleLibrary};
    pub use crate::schema::{PropertyDefinition, PropertyType, Schema, SchemaOptions};
}
