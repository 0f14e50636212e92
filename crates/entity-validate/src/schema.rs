//! Schema descriptor: property definitions, options and virtual properties.

use std::fmt;

use entity_core::Value;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::rules::Rule;

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Int,
    Double,
    Boolean,
    Buffer,
    Array,
    Object,
    Datetime,
    GeoPoint,
}

impl PropertyType {
    /// Returns the type name used in schema documents and messages.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Double => "double",
            PropertyType::Boolean => "boolean",
            PropertyType::Buffer => "buffer",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
            PropertyType::Datetime => "datetime",
            PropertyType::GeoPoint => "geoPoint",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One schema entry.
///
/// `property_type`, `values` and `validate` are independent: each one that
/// is set is checked, and each failure is its own violation.
#[derive(Debug, Clone, Default)]
pub struct PropertyDefinition {
    pub property_type: Option<PropertyType>,
    pub required: bool,
    /// Allow-list of literal values.
    pub values: Option<Vec<Value>>,
    pub validate: Option<Rule>,
    /// Write-time default. Validation never reads it.
    pub default: Option<Value>,
}

impl PropertyDefinition {
    /// An unconstrained, optional property.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a definition with only a type.
    pub fn typed(property_type: PropertyType) -> Self {
        Self::new().of_type(property_type)
    }

    /// Set the declared type.
    pub fn of_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Mark the property as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the value to an allow-list.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a library rule or custom predicate.
    pub fn validate(mut self, rule: Rule) -> Self {
        self.validate = Some(rule);
        self
    }

    /// Set the write-time default.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Schema-wide options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SchemaOptions {
    /// Reject data keys that are neither declared nor virtual.
    pub explicit_only: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            explicit_only: true,
        }
    }
}

/// A resolved schema: what the validation engine consumes.
///
/// ## Example
///
/// ```rust
/// use entity_validate::{PropertyDefinition, PropertyType, Rule, Schema};
///
/// let schema = Schema::new()
///     .property("name", PropertyDefinition::typed(PropertyType::String).required())
///     .property("email", PropertyDefinition::new().validate(Rule::named("isEmail")?))
///     .virtual_property("fullName");
///
/// assert!(schema.options().explicit_only);
/// assert!(schema.is_virtual("fullName"));
/// # Ok::<(), entity_validate::SchemaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: IndexMap<String, PropertyDefinition>,
    options: SchemaOptions,
    virtuals: IndexSet<String>,
}

impl Schema {
    /// An empty, explicit-only schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) a property.
    pub fn property(mut self, name: impl Into<String>, definition: PropertyDefinition) -> Self {
        self.properties.insert(name.into(), definition);
        self
    }

    /// Declare a computed property that validation ignores and strips.
    pub fn virtual_property(mut self, name: impl Into<String>) -> Self {
        self.virtuals.insert(name.into());
        self
    }

    /// Set whether undeclared data keys are rejected.
    pub fn explicit_only(mut self, explicit_only: bool) -> Self {
        self.options.explicit_only = explicit_only;
        self
    }

    /// Replace the schema-wide options.
    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a rule to an already declared property.
    ///
    /// This is how custom predicates reach schemas loaded from documents.
    pub fn set_rule(&mut self, name: &str, rule: Rule) -> SchemaResult<()> {
        let definition = self
            .properties
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownProperty(name.to_string()))?;
        definition.validate = Some(rule);
        Ok(())
    }

    /// Definition of a declared property.
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, PropertyDefinition> {
        &self.properties
    }

    /// Schema-wide options.
    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Virtual property names in declaration order.
    pub fn virtuals(&self) -> impl Iterator<Item = &str> {
        self.virtuals.iter().map(String::as_str)
    }

    /// Whether `name` is a declared virtual property.
    pub fn is_virtual(&self, name: &str) -> bool {
        self.virtuals.contains(name)
    }
}
