//! Tagged wrapper values.
//!
//! Datastores distinguish an integer `7` from a double `7.0` and a geo point
//! from a plain map that happens to carry `latitude`/`longitude` keys. The
//! wrappers below keep that distinction explicit: each one is its own
//! [`Value`] variant, so checkers match on the variant instead of probing
//! fields.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::value::{Map, Value};

/// Capability shared by wrapper values that stand for a plain primitive.
pub trait Coercible {
    /// The underlying raw representation, as the datastore stores it.
    fn raw(&self) -> Cow<'_, str>;

    /// The plain value this wrapper stands for.
    fn to_primitive(&self) -> Value;
}

/// Integer wrapper. The raw representation is kept as a string so values
/// beyond the native range survive a round trip through the datastore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerValue {
    raw: String,
}

impl IntegerValue {
    /// Wrap a native integer.
    pub fn new(value: i64) -> Self {
        Self {
            raw: value.to_string(),
        }
    }

    /// Wrap a raw representation as received from the datastore.
    ///
    /// The raw string is not checked here; whether it parses as an integer
    /// is what the `int` type check decides.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Parse the raw representation.
    pub fn as_i64(&self) -> Option<i64> {
        self.raw.parse().ok()
    }

    /// Whether the raw representation is an integer string of any width.
    pub fn is_integral(&self) -> bool {
        let digits = self
            .raw
            .strip_prefix('-')
            .or_else(|| self.raw.strip_prefix('+'))
            .unwrap_or(&self.raw);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Coercible for IntegerValue {
    fn raw(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.raw)
    }

    fn to_primitive(&self) -> Value {
        match self.as_i64() {
            Some(n) => Value::Number(n.into()),
            None => Value::String(self.raw.clone()),
        }
    }
}

impl From<i64> for IntegerValue {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Double wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleValue {
    raw: String,
}

impl DoubleValue {
    /// Wrap a native float. Non-finite values are rejected.
    pub fn new(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::NonFiniteDouble(value));
        }
        Ok(Self {
            raw: value.to_string(),
        })
    }

    /// Wrap a raw representation as received from the datastore.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Parse the raw representation. `NaN` and infinities are not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        self.raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl Coercible for DoubleValue {
    fn raw(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.raw)
    }

    fn to_primitive(&self) -> Value {
        match self.as_f64().and_then(serde_json::Number::from_f64) {
            Some(n) => Value::Number(n),
            None => Value::String(self.raw.clone()),
        }
    }
}

impl fmt::Display for DoubleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Geographic point wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point, checking both coordinates are in range.
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, within `-90..=90`.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, within `-180..=180`.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Coercible for GeoPoint {
    fn raw(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{},{}", self.latitude, self.longitude))
    }

    fn to_primitive(&self) -> Value {
        let mut map = Map::new();
        map.insert("latitude".to_string(), Value::from(self.latitude));
        map.insert("longitude".to_string(), Value::from(self.longitude));
        Value::Object(map)
    }
}
