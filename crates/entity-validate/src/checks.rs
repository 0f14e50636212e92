//! Per-value checks: emptiness, declared-type matching and allow-list
//! membership.

use std::sync::OnceLock;

use entity_core::Value;
use regex::Regex;
use serde_json::Number;

use crate::schema::PropertyType;

fn date_regex() -> &'static Regex {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"))
}

/// Null, `""` and whitespace-only strings count as "no value". `0` and
/// `false` do not.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Whether a present value has the shape the declared type demands.
pub(crate) fn matches_type(property_type: PropertyType, value: &Value) -> bool {
    match property_type {
        PropertyType::String => matches!(value, Value::String(_)),
        PropertyType::Int => match value {
            Value::Number(n) => is_whole(n),
            Value::Int(int) => int.is_integral(),
            _ => false,
        },
        PropertyType::Double => match value {
            Value::Number(_) => true,
            Value::Double(double) => double.as_f64().is_some(),
            _ => false,
        },
        PropertyType::Boolean => matches!(value, Value::Bool(_)),
        PropertyType::Buffer => matches!(value, Value::Buffer(_)),
        PropertyType::Array => matches!(value, Value::Array(_)),
        PropertyType::Object => matches!(value, Value::Object(_)),
        PropertyType::Datetime => match value {
            Value::DateTime(_) => true,
            Value::String(s) => date_regex().is_match(s),
            _ => false,
        },
        PropertyType::GeoPoint => match value {
            Value::GeoPoint(_) => true,
            Value::Object(map) => {
                is_coordinate(map.get("latitude")) && is_coordinate(map.get("longitude"))
            }
            _ => false,
        },
    }
}

/// Allow-list membership. Plain numbers compare by numeric value, so `7`
/// and `7.0` are the same member; everything else compares structurally.
pub(crate) fn is_allowed(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => same_number(a, b),
        _ => candidate == value,
    })
}

fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn is_whole(n: &Number) -> bool {
    n.is_i64()
        || n.is_u64()
        || n.as_f64()
            .map_or(false, |f| f.is_finite() && f.fract() == 0.0)
}

fn is_coordinate(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_or(false, f64::is_finite),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::Utc;
    use entity_core::{DoubleValue, GeoPoint, IntegerValue};
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn empty_values() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&v(json!(""))));
        assert!(is_empty_value(&v(json!("   \t"))));
        assert!(!is_empty_value(&v(json!("x"))));
        assert!(!is_empty_value(&v(json!(0))));
        assert!(!is_empty_value(&v(json!(false))));
        assert!(!is_empty_value(&v(json!([]))));
    }

    #[test]
    fn allow_list_compares_numbers_by_value() {
        let allowed = [v(json!(7)), v(json!("image"))];

        assert!(is_allowed(&allowed, &v(json!(7))));
        assert!(is_allowed(&allowed, &v(json!(7.0))));
        assert!(is_allowed(&[v(json!(2.5))], &v(json!(2.5))));
        assert!(is_allowed(&allowed, &v(json!("image"))));

        assert!(!is_allowed(&allowed, &v(json!(7.5))));
        assert!(!is_allowed(&allowed, &v(json!("7"))));
        assert!(!is_allowed(&allowed, &Value::Int(IntegerValue::new(7))));
        assert!(!is_allowed(&[v(json!(-1))], &v(json!(u64::MAX))));
    }

    #[test]
    fn string_type() {
        assert!(matches_type(PropertyType::String, &v(json!("a"))));
        assert!(!matches_type(PropertyType::String, &v(json!(123))));
    }

    #[test]
    fn int_type() {
        assert!(matches_type(PropertyType::Int, &v(json!(7))));
        assert!(matches_type(PropertyType::Int, &v(json!(-7))));
        assert!(matches_type(PropertyType::Int, &v(json!(7.0))));
        assert!(matches_type(PropertyType::Int, &Value::Int(IntegerValue::new(7))));
        assert!(matches_type(PropertyType::Int, &Value::Int(IntegerValue::from_raw("12"))));

        assert!(!matches_type(PropertyType::Int, &v(json!(7.5))));
        assert!(!matches_type(PropertyType::Int, &v(json!("7"))));
        assert!(!matches_type(PropertyType::Int, &v(json!("abc"))));
        assert!(!matches_type(PropertyType::Int, &Value::Int(IntegerValue::from_raw("1.5"))));
        assert!(!matches_type(PropertyType::Int, &Value::Double(DoubleValue::new(7.0).unwrap())));
    }

    #[test]
    fn double_type() {
        assert!(matches_type(PropertyType::Double, &v(json!(1.5))));
        assert!(matches_type(PropertyType::Double, &v(json!(2))));
        assert!(matches_type(PropertyType::Double, &Value::Double(DoubleValue::new(1.5).unwrap())));
        assert!(matches_type(PropertyType::Double, &Value::Double(DoubleValue::from_raw("3"))));

        assert!(!matches_type(PropertyType::Double, &v(json!("1.5"))));
        assert!(!matches_type(PropertyType::Double, &Value::Double(DoubleValue::from_raw("x"))));
        assert!(!matches_type(PropertyType::Double, &v(json!(true))));
    }

    #[test]
    fn boolean_buffer_array_object() {
        assert!(matches_type(PropertyType::Boolean, &v(json!(false))));
        assert!(!matches_type(PropertyType::Boolean, &v(json!("true"))));

        assert!(matches_type(PropertyType::Buffer, &Value::Buffer(Bytes::from_static(b"x"))));
        assert!(!matches_type(PropertyType::Buffer, &v(json!("x"))));

        assert!(matches_type(PropertyType::Array, &v(json!([1, 2]))));
        assert!(!matches_type(PropertyType::Array, &v(json!({ "0": 1 }))));
        assert!(!matches_type(PropertyType::Array, &v(json!("12"))));

        assert!(matches_type(PropertyType::Object, &v(json!({ "a": 1 }))));
        assert!(!matches_type(PropertyType::Object, &v(json!([1]))));
        assert!(!matches_type(PropertyType::Object, &v(json!(1))));
        assert!(!matches_type(PropertyType::Object, &Value::GeoPoint(GeoPoint::new(1.0, 1.0).unwrap())));
        assert!(!matches_type(PropertyType::Object, &Value::Buffer(Bytes::new())));
        assert!(!matches_type(PropertyType::Object, &Value::DateTime(Utc::now())));
    }

    #[test]
    fn datetime_type() {
        assert!(matches_type(PropertyType::Datetime, &Value::DateTime(Utc::now())));
        assert!(matches_type(PropertyType::Datetime, &v(json!("2015-01-01"))));

        assert!(!matches_type(PropertyType::Datetime, &v(json!("01-01-2015"))));
        assert!(!matches_type(PropertyType::Datetime, &v(json!("2015/01/01"))));
        assert!(!matches_type(PropertyType::Datetime, &v(json!("2015-01-01T00:00:00Z"))));
        assert!(!matches_type(PropertyType::Datetime, &v(json!("tomorrow"))));
        assert!(!matches_type(PropertyType::Datetime, &v(json!(20150101))));
    }

    #[test]
    fn geo_point_type() {
        let point = Value::GeoPoint(GeoPoint::new(40.7, -74.0).unwrap());
        assert!(matches_type(PropertyType::GeoPoint, &point));
        assert!(matches_type(
            PropertyType::GeoPoint,
            &v(json!({ "latitude": 40.7, "longitude": -74.0 }))
        ));
        assert!(matches_type(
            PropertyType::GeoPoint,
            &v(json!({ "latitude": "40.7", "longitude": "-74" }))
        ));

        assert!(!matches_type(PropertyType::GeoPoint, &v(json!("40.7,-74.0"))));
        assert!(!matches_type(PropertyType::GeoPoint, &v(json!(true))));
        assert!(!matches_type(PropertyType::GeoPoint, &v(json!({ "latitude": 40.7 }))));
        assert!(!matches_type(
            PropertyType::GeoPoint,
            &v(json!({ "latitude": "north", "longitude": -74.0 }))
        ));
    }
}
