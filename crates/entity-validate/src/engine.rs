//! The validation engine.
//!
//! One pass over the data:
//!
//! 1. virtual properties are removed from the caller's map, in place
//! 2. each data key, in enumeration order, goes through the unknown-property
//!    policy, then the required/empty check, then the type, value-set and
//!    rule checks
//! 3. declared required properties missing from the data are reported in
//!    schema declaration order
//!
//! Every violation is collected; nothing stops the pass early.

use std::future::{ready, IntoFuture, Ready};

use entity_core::{Map, Value};

use crate::checks::{is_allowed, is_empty_value, matches_type};
use crate::error::{ValidationError, Violation};
use crate::rules::RuleLibrary;
use crate::schema::{PropertyDefinition, Schema};

/// A schema bound to an entity kind, reusable across validation calls.
///
/// ```rust
/// use entity_core::entity;
/// use entity_validate::{PropertyDefinition, PropertyType, Schema, SchemaValidator};
///
/// let schema = Schema::new().property("name", PropertyDefinition::typed(PropertyType::String));
/// let validator = SchemaValidator::new(&schema, "User");
///
/// let mut data = entity!({ "name": 123 });
/// let result = validator.validate(&mut data);
/// assert_eq!(result.error.unwrap().errors[0].property, "name");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'s> {
    schema: &'s Schema,
    kind: &'s str,
    library: &'static RuleLibrary,
}

impl<'s> SchemaValidator<'s> {
    /// Bind `schema` to the entity kind named in reports.
    pub fn new(schema: &'s Schema, kind: &'s str) -> Self {
        Self {
            schema,
            kind,
            library: RuleLibrary::global(),
        }
    }

    /// The bound schema.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// The entity kind reported in violations.
    pub fn kind(&self) -> &'s str {
        self.kind
    }

    /// Validate `data` against the bound schema.
    ///
    /// Virtual properties are stripped from `data` itself; the result hands
    /// back the same map.
    pub fn validate<'a>(&self, data: &'a mut Map) -> ValidationResult<'a> {
        strip_virtuals(data, self.schema);

        let violations = self.collect(data);
        for violation in &violations {
            tracing::trace!(
                kind = self.kind,
                property = %violation.property,
                code = %violation.code,
                "property violation"
            );
        }
        tracing::debug!(
            kind = self.kind,
            violations = violations.len(),
            "validation pass finished"
        );

        let error = if violations.is_empty() {
            None
        } else {
            Some(ValidationError::new(self.kind, violations))
        };

        ValidationResult { error, value: data }
    }

    fn collect(&self, data: &Map) -> Vec<Violation> {
        let mut violations = Vec::new();
        let explicit_only = self.schema.options().explicit_only;

        for (name, value) in data {
            match self.schema.get(name) {
                Some(definition) => {
                    self.check_property(name, value, definition, data, &mut violations)
                }
                None if explicit_only => {
                    violations.push(Violation::not_allowed(name, self.kind));
                }
                None => {}
            }
        }

        for (name, definition) in self.schema.properties() {
            if definition.required && !self.schema.is_virtual(name) && !data.contains_key(name) {
                violations.push(Violation::required(name));
            }
        }

        violations
    }

    fn check_property(
        &self,
        name: &str,
        value: &Value,
        definition: &PropertyDefinition,
        data: &Map,
        violations: &mut Vec<Violation>,
    ) {
        if is_empty_value(value) {
            if definition.required {
                violations.push(Violation::required(name));
            }
            return;
        }

        if let Some(property_type) = definition.property_type {
            if !matches_type(property_type, value) {
                violations.push(Violation::wrong_type(
                    name,
                    property_type.name(),
                    value.type_name(),
                ));
            }
        }

        if let Some(allowed) = &definition.values {
            if !is_allowed(allowed, value) {
                violations.push(Violation::out_of_range(name, allowed));
            }
        }

        if let Some(rule) = &definition.validate {
            if !rule.evaluate(value, data, self.library) {
                violations.push(Violation::wrong_value(name, value, rule.name()));
            }
        }
    }
}

/// Validate `data` against `schema` as an entity of kind `kind`.
///
/// Shorthand for [`SchemaValidator::new`] followed by
/// [`SchemaValidator::validate`].
pub fn validate<'a>(data: &'a mut Map, schema: &Schema, kind: &str) -> ValidationResult<'a> {
    SchemaValidator::new(schema, kind).validate(data)
}

fn strip_virtuals(data: &mut Map, schema: &Schema) {
    data.retain(|name, _| !schema.is_virtual(name));
}

/// Outcome of one validation pass.
///
/// Read it synchronously through `error`/`value`, or `.await` it: the
/// future is already complete and yields `value` or the same
/// [`ValidationError`].
#[derive(Debug)]
#[must_use]
pub struct ValidationResult<'a> {
    /// Every violation found, or `None` when the data is valid
    pub error: Option<ValidationError>,
    /// The map that was validated, after virtual stripping
    pub value: &'a mut Map,
}

impl<'a> ValidationResult<'a> {
    /// `true` when no violation was recorded.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Convert to `Result`: the validated map or the report.
    pub fn into_result(self) -> Result<&'a mut Map, ValidationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

impl<'a> IntoFuture for ValidationResult<'a> {
    type Output = Result<&'a mut Map, ValidationError>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self.into_result())
    }
}
