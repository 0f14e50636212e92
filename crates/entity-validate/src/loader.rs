//! Loading schemas from JSON documents.
//!
//! ```json
//! {
//!   "properties": {
//!     "name":  { "type": "string", "required": true },
//!     "site":  { "validate": "isURL" },
//!     "ip":    { "validate": { "rule": "isIP", "args": [4] } },
//!     "kind":  { "values": ["image", "video"], "default": "image" }
//!   },
//!   "options": { "explicitOnly": true },
//!   "virtuals": ["fullName"]
//! }
//! ```
//!
//! Rule names are resolved while loading, so a misspelled rule fails here
//! instead of silently passing later.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use entity_core::Value;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::SchemaResult;
use crate::rules::{Rule, RuleLibrary};
use crate::schema::{PropertyDefinition, PropertyType, Schema, SchemaOptions};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    #[serde(default)]
    properties: IndexMap<String, PropertyDocument>,
    #[serde(default)]
    options: SchemaOptions,
    #[serde(default)]
    virtuals: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyDocument {
    #[serde(rename = "type")]
    property_type: Option<PropertyType>,
    #[serde(default)]
    required: bool,
    values: Option<Vec<JsonValue>>,
    validate: Option<RuleDocument>,
    default: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    Name(String),
    WithArgs {
        rule: String,
        #[serde(default)]
        args: Vec<JsonValue>,
    },
}

/// Builds [`Schema`]s from JSON documents.
#[derive(Debug, Clone, Copy)]
pub struct SchemaLoader {
    library: &'static RuleLibrary,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLoader {
    /// A loader resolving rules against the global library.
    pub fn new() -> Self {
        Self {
            library: RuleLibrary::global(),
        }
    }

    /// Load a schema from a JSON string.
    pub fn load_str(&self, document: &str) -> SchemaResult<Schema> {
        let document: SchemaDocument = serde_json::from_str(document)?;
        self.build(document)
    }

    /// Load a schema from any reader producing a JSON document.
    pub fn load_reader<R: Read>(&self, reader: R) -> SchemaResult<Schema> {
        let document: SchemaDocument = serde_json::from_reader(reader)?;
        self.build(document)
    }

    /// Load a schema from a JSON file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> SchemaResult<Schema> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let schema = self.load_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), "schema file loaded");
        Ok(schema)
    }

    /// Load a schema from an already parsed JSON value.
    pub fn load_value(&self, document: JsonValue) -> SchemaResult<Schema> {
        let document: SchemaDocument = serde_json::from_value(document)?;
        self.build(document)
    }

    fn build(&self, document: SchemaDocument) -> SchemaResult<Schema> {
        let mut schema = Schema::new().with_options(document.options);

        for (name, property) in document.properties {
            let definition = self.definition(property)?;
            schema = schema.property(name, definition);
        }
        for name in document.virtuals {
            schema = schema.virtual_property(name);
        }

        tracing::debug!(
            properties = schema.properties().len(),
            explicit_only = schema.options().explicit_only,
            "schema loaded"
        );
        Ok(schema)
    }

    fn definition(&self, property: PropertyDocument) -> SchemaResult<PropertyDefinition> {
        let mut definition = PropertyDefinition::new();
        definition.property_type = property.property_type;
        definition.required = property.required;
        definition.values = property
            .values
            .map(|values| values.into_iter().map(Value::from).collect());
        definition.default = property.default.map(Value::from);
        definition.validate = property
            .validate
            .map(|rule| self.rule(rule))
            .transpose()?;
        Ok(definition)
    }

    fn rule(&self, document: RuleDocument) -> SchemaResult<Rule> {
        let (id, args) = match document {
            RuleDocument::Name(id) => (id, Vec::new()),
            RuleDocument::WithArgs { rule, args } => (rule, args),
        };
        let rule = self.library.resolve(&id, &args)?;
        Ok(Rule::Named { id, args, rule })
    }
}

impl FromStr for Schema {
    type Err = crate::error::SchemaError;

    fn from_str(document: &str) -> Result<Self, Self::Err> {
        SchemaLoader::new().load_str(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use serde_json::json;

    #[test]
    fn loads_full_document() {
        let schema = SchemaLoader::new()
            .load_value(json!({
                "properties": {
                    "name": { "type": "string", "required": true },
                    "ip": { "validate": { "rule": "isIP", "args": [4] } },
                    "site": { "validate": "isURL" },
                    "kind": { "values": ["image", "video"], "default": "image" }
                },
                "options": { "explicitOnly": false },
                "virtuals": ["fullName"]
            }))
            .unwrap();

        let names: Vec<&str> = schema.properties().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "ip", "site", "kind"]);

        let name = schema.get("name").unwrap();
        assert_eq!(name.property_type, Some(PropertyType::String));
        assert!(name.required);

        let ip = schema.get("ip").unwrap().validate.as_ref().unwrap();
        assert_eq!(ip.name(), "isIP");
        assert_eq!(ip.args(), &[json!(4)]);

        assert_eq!(schema.get("kind").unwrap().default, Some(Value::from("image")));
        assert!(!schema.options().explicit_only);
        assert!(schema.is_virtual("fullName"));
    }

    #[test]
    fn defaults_when_sections_missing() {
        let schema: Schema = "{}".parse().unwrap();
        assert!(schema.properties().is_empty());
        assert!(schema.options().explicit_only);
    }

    #[test]
    fn unknown_rule_fails_at_load() {
        let err = SchemaLoader::new()
            .load_str(r#"{ "properties": { "a": { "validate": "isBogus" } } }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRule(name) if name == "isBogus"));
    }

    #[test]
    fn bad_rule_args_fail_at_load() {
        let err = SchemaLoader::new()
            .load_str(r#"{ "properties": { "a": { "validate": { "rule": "isIP", "args": [5] } } } }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRuleArgs { .. }));
    }

    #[test]
    fn malformed_documents_are_parse_errors() {
        let loader = SchemaLoader::new();
        assert!(matches!(loader.load_str("{ nope"), Err(SchemaError::Parse(_))));
        assert!(matches!(
            loader.load_str(r#"{ "properties": { "a": { "type": "uuid" } } }"#),
            Err(SchemaError::Parse(_))
        ));
        assert!(matches!(
            loader.load_str(r#"{ "properties": { "a": { "requried": true } } }"#),
            Err(SchemaError::Parse(_))
        ));
        assert!(matches!(
            loader.load_str(r#"{ "options": { "explicitonly": false } }"#),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SchemaLoader::new()
            .load_path("/definitely/not/here/schema.json")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
