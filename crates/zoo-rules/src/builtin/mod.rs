//! Built-in rules for C# style checking

pub mod inclusiveness;
pub mod matcher;
pub mod namespace_layout;
pub mod terms;

pub use inclusiveness::{INCLUSIVE_TERMINOLOGY, InclusivenessChecker};
pub use namespace_layout::{FILE_SCOPED_NAMESPACE_EMPTY_LINE, NamespaceLayoutChecker};
pub use terms::{BUILTIN_TERMS, TermEntry, TermTable};

use crate::metadata::RuleMetadata;

/// Collection of built-in rules
pub struct BuiltinRules;

impl BuiltinRules {
    /// Metadata of every built-in rule, in id order
    pub fn all() -> Vec<RuleMetadata> {
        vec![
            namespace_layout::metadata(),
            inclusiveness::metadata(),
        ]
    }

    pub fn ids() -> Vec<&'static str> {
        Self::all().into_iter().map(|rule| rule.id).collect()
    }

    pub fn get(rule_id: &str) -> Option<RuleMetadata> {
        Self::all().into_iter().find(|rule| rule.id == rule_id)
    }
}
