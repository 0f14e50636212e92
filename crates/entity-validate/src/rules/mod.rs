//! Validation rules: the named library and the rule references schemas hold.

mod library;
mod rule;

pub use library::*;
pub use rule::{Predicate, Rule};
