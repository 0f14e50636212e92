//! The value model an entity is made of.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::wrappers::{Coercible, DoubleValue, GeoPoint, IntegerValue};

/// An entity's data: property name to value, in insertion order.
pub type Map = IndexMap<String, Value>;

/// A single property value.
///
/// Plain JSON-like values sit next to the datastore's tagged wrappers. A
/// wrapper is recognised by its variant alone: a `Value::Object` with
/// `latitude`/`longitude` keys is still a plain object, not a `GeoPoint`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// A plain number, integral or fractional.
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// Tagged integer wrapper.
    Int(IntegerValue),
    /// Tagged double wrapper.
    Double(DoubleValue),
    /// Tagged geographic point.
    GeoPoint(GeoPoint),
    /// Binary buffer.
    Buffer(Bytes),
    /// Native date/time.
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Consume the value, keeping it only if it is a plain object.
    pub fn into_object(self) -> Option<Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in error details.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::GeoPoint(_) => "geoPoint",
            Value::Buffer(_) => "buffer",
            Value::DateTime(_) => "datetime",
        }
    }

    /// The string a value is coerced to before a string rule looks at it.
    ///
    /// Collections, geo points, buffers and null have no string form.
    pub fn string_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Int(int) => Some(int.raw()),
            Value::Double(double) => Some(double.raw()),
            Value::DateTime(dt) => Some(Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::GeoPoint(_)
            | Value::Buffer(_) => None,
        }
    }

    /// Lower the value to plain JSON. Wrappers become the primitive they
    /// stand for, buffers become byte arrays and dates RFC 3339 strings.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Int(int) => int.to_primitive().to_json(),
            Value::Double(double) => double.to_primitive().to_json(),
            Value::GeoPoint(point) => point.to_primitive().to_json(),
            Value::Buffer(buf) => JsonValue::Array(buf.iter().map(|b| JsonValue::from(*b)).collect()),
            Value::DateTime(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Buffer(buf) => write!(f, "<buffer {} bytes>", buf.len()),
            other => match other.string_form() {
                Some(s) => f.write_str(&s),
                None => write!(f, "{}", other.to_json()),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON number and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<IntegerValue> for Value {
    fn from(value: IntegerValue) -> Self {
        Value::Int(value)
    }
}

impl From<DoubleValue> for Value {
    fn from(value: DoubleValue) -> Self {
        Value::Double(value)
    }
}

impl From<GeoPoint> for Value {
    fn from(value: GeoPoint) -> Self {
        Value::GeoPoint(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Buffer(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

/// Build an entity [`Map`] from a `json!`-style literal.
///
/// ```
/// use entity_core::{entity, Value};
///
/// let data = entity!({ "name": "John", "age": 30 });
/// assert_eq!(data.get("name"), Some(&Value::from("John")));
/// ```
///
/// A literal that is not an object yields an empty map.
#[macro_export]
macro_rules! entity {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::json!($($json)+))
            .into_object()
            .unwrap_or_default()
    };
}
