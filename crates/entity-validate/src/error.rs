//! Violation records, the aggregated validation report and schema errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Stable violation codes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Value has the wrong shape for the declared type.
    #[serde(rename = "ERR_PROP_TYPE")]
    PropType,
    /// Value failed a library or custom rule.
    #[serde(rename = "ERR_PROP_VALUE")]
    PropValue,
    /// Property is not declared and the schema only accepts declared ones.
    #[serde(rename = "ERR_PROP_NOT_ALLOWED")]
    PropNotAllowed,
    /// Required property is absent or empty.
    #[serde(rename = "ERR_PROP_REQUIRED")]
    PropRequired,
    /// Value is not in the declared allow-list.
    #[serde(rename = "ERR_PROP_IN_RANGE")]
    PropInRange,
}

impl ErrorKind {
    /// Returns the string code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::PropType => "ERR_PROP_TYPE",
            ErrorKind::PropValue => "ERR_PROP_VALUE",
            ErrorKind::PropNotAllowed => "ERR_PROP_NOT_ALLOWED",
            ErrorKind::PropRequired => "ERR_PROP_REQUIRED",
            ErrorKind::PropInRange => "ERR_PROP_IN_RANGE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single violation: one failed check on one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Violation code
    pub code: ErrorKind,
    /// The property that failed
    pub property: String,
    /// Human-readable error message
    pub message: String,
    /// Details such as the expected type or the failing rule
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl Violation {
    /// Create a new violation.
    pub fn new(code: ErrorKind, property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            property: property.into(),
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a detail parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }

    pub(crate) fn wrong_type(property: &str, expected: &str, actual: &str) -> Self {
        let article = match expected.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        };
        Self::new(
            ErrorKind::PropType,
            property,
            format!("Property \"{property}\" must be {article} {expected}."),
        )
        .param("expected", expected)
        .param("actual", actual)
    }

    pub(crate) fn wrong_value(property: &str, value: &entity_core::Value, rule: &str) -> Self {
        Self::new(
            ErrorKind::PropValue,
            property,
            format!("\"{value}\" is not a valid value for property \"{property}\"."),
        )
        .param("rule", rule)
    }

    pub(crate) fn not_allowed(property: &str, kind: &str) -> Self {
        Self::new(
            ErrorKind::PropNotAllowed,
            property,
            format!("Property \"{property}\" is not allowed for entityKind \"{kind}\"."),
        )
    }

    pub(crate) fn required(property: &str) -> Self {
        Self::new(
            ErrorKind::PropRequired,
            property,
            format!("Property \"{property}\" is required but no value has been set."),
        )
    }

    pub(crate) fn out_of_range(property: &str, allowed: &[entity_core::Value]) -> Self {
        let listed = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            ErrorKind::PropInRange,
            property,
            format!("Property \"{property}\" must be one of [{listed}]."),
        )
        .param("values", allowed)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Internal error structure for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    kind: String,
    message: String,
    errors: Vec<Violation>,
}

/// Wrapper for the error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// The report of a failed validation pass: every violation found, in the
/// order the engine recorded them.
///
/// Serializes to:
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "kind": "User",
///     "message": "Property \"name\" must be a string.",
///     "errors": [{ "code": "ERR_PROP_TYPE", "property": "name", "message": "..." }]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Ordered violations
    pub errors: Vec<Violation>,
    /// Entity kind the data was validated as
    pub kind: String,
}

impl ValidationError {
    /// Create a report for an entity kind.
    pub fn new(kind: impl Into<String>, errors: Vec<Violation>) -> Self {
        Self {
            errors,
            kind: kind.into(),
        }
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a violation.
    pub fn add(&mut self, violation: Violation) {
        self.errors.push(violation);
    }

    /// Violations with the given code.
    pub fn of_kind(&self, code: ErrorKind) -> impl Iterator<Item = &Violation> {
        self.errors.iter().filter(move |v| v.code == code)
    }

    /// Violations recorded against one property.
    pub fn for_property<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.errors.iter().filter(move |v| v.property == property)
    }

    /// Codes in report order.
    pub fn codes(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(|v| v.code).collect()
    }

    /// The violation messages joined one per line.
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert to `Result`: `Ok` when no violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wrapper = ErrorWrapper {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                kind: self.kind.clone(),
                message: self.message(),
                errors: self.errors.clone(),
            },
        };
        wrapper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wrapper = ErrorWrapper::deserialize(deserializer)?;
        Ok(Self {
            errors: wrapper.error.errors,
            kind: wrapper.error.kind,
        })
    }
}

/// Schema configuration defects. These surface when a schema is built or
/// loaded, never while data is being validated.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("invalid arguments for rule '{rule}': {reason}")]
    InvalidRuleArgs { rule: String, reason: String },

    #[error("property '{0}' is not declared in the schema")]
    UnknownProperty(String),

    #[error("malformed schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read schema document: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    pub(crate) fn invalid_args(rule: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidRuleArgs {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema construction and loading.
pub type SchemaResult<T> = Result<T, SchemaError>;
