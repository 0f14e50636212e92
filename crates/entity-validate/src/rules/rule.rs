//! Rule references attached to schema properties.

use std::fmt;
use std::sync::Arc;

use entity_core::{Map, Value};
use serde_json::Value as JsonValue;

use super::library::{LibraryRule, RuleLibrary};
use crate::error::SchemaResult;

/// Custom predicate: receives the whole entity, the rule library and the
/// declared arguments.
pub type Predicate = Arc<dyn Fn(&Map, &RuleLibrary, &[JsonValue]) -> bool + Send + Sync>;

/// The `validate` entry of a property.
#[derive(Clone)]
pub enum Rule {
    /// A library rule, resolved when the rule was built.
    Named {
        id: String,
        args: Vec<JsonValue>,
        rule: Arc<dyn LibraryRule>,
    },
    /// A caller-supplied predicate.
    Custom {
        predicate: Predicate,
        args: Vec<JsonValue>,
    },
}

impl Rule {
    /// Reference a library rule without arguments.
    pub fn named(id: impl Into<String>) -> SchemaResult<Self> {
        Self::named_with_args(id, Vec::new())
    }

    /// Reference a library rule with positional arguments.
    ///
    /// Fails if no rule is registered under `id` or the arguments do not
    /// fit it.
    pub fn named_with_args(id: impl Into<String>, args: Vec<JsonValue>) -> SchemaResult<Self> {
        let id = id.into();
        let rule = RuleLibrary::global().resolve(&id, &args)?;
        Ok(Rule::Named { id, args, rule })
    }

    /// Wrap a custom predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Map, &RuleLibrary, &[JsonValue]) -> bool + Send + Sync + 'static,
    {
        Self::custom_with_args(predicate, Vec::new())
    }

    /// Wrap a custom predicate with arguments handed to every call.
    pub fn custom_with_args<F>(predicate: F, args: Vec<JsonValue>) -> Self
    where
        F: Fn(&Map, &RuleLibrary, &[JsonValue]) -> bool + Send + Sync + 'static,
    {
        Rule::Custom {
            predicate: Arc::new(predicate),
            args,
        }
    }

    /// Rule identifier for error details; `"custom"` for predicates.
    pub fn name(&self) -> &str {
        match self {
            Rule::Named { id, .. } => id,
            Rule::Custom { .. } => "custom",
        }
    }

    /// Declared positional arguments.
    pub fn args(&self) -> &[JsonValue] {
        match self {
            Rule::Named { args, .. } | Rule::Custom { args, .. } => args,
        }
    }

    /// Run the rule against one property value.
    ///
    /// Library rules see the value's string form; an array passes when every
    /// element does. Values with no string form fail. Custom predicates see
    /// the whole entity instead of the value.
    pub fn evaluate(&self, value: &Value, data: &Map, library: &RuleLibrary) -> bool {
        match self {
            Rule::Named { rule, .. } => match value {
                Value::Array(items) => items.iter().all(|item| check_string_form(rule.as_ref(), item)),
                other => check_string_form(rule.as_ref(), other),
            },
            Rule::Custom { predicate, args } => predicate(data, library, args.as_slice()),
        }
    }
}

fn check_string_form(rule: &dyn LibraryRule, value: &Value) -> bool {
    value
        .string_form()
        .map_or(false, |s| rule.check(&s))
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Named { id, args, .. } => f
                .debug_struct("Named")
                .field("id", id)
                .field("args", args)
                .finish(),
            Rule::Custom { args, .. } => f
                .debug_struct("Custom")
                .field("args", args)
                .finish_non_exhaustive(),
        }
    }
}
