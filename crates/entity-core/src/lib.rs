//! # Entity Core
//!
//! The value model shared by the entity crates. An entity is an ordered
//! [`Map`] of property names to [`Value`]s; values are either plain
//! (strings, numbers, booleans, arrays, objects) or one of the datastore's
//! tagged wrappers:
//!
//! - [`IntegerValue`] and [`DoubleValue`] keep the raw representation the
//!   datastore stored, so an integer is never confused with a numeric string
//! - [`GeoPoint`] is a checked latitude/longitude pair
//! - buffers ([`bytes::Bytes`]) and native date/times
//!   ([`chrono::DateTime<Utc>`](chrono::DateTime))
//!
//! Wrappers implement [`Coercible`], which exposes the raw representation and
//! the plain value they stand for.
//!
//! ## Example
//!
//! ```rust
//! use entity_core::{entity, IntegerValue, Value};
//!
//! let mut data = entity!({ "name": "John" });
//! data.insert("age".into(), Value::Int(IntegerValue::new(30)));
//!
//! assert_eq!(data.keys().collect::<Vec<_>>(), vec!["name", "age"]);
//! ```

mod error;
mod value;
mod wrappers;

pub use error::{CoreError, CoreResult};
pub use value::{Map, Value};
pub use wrappers::{Coercible, DoubleValue, GeoPoint, IntegerValue};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
