//! Zoo Rules
//!
//! Built-in style rules, their fixes and the rule engine for the zoo C#
//! checker:
//!
//! - `style/inclusive-terminology` flags non-inclusive terms in symbol names
//!   and documentation comments
//! - `style/file-scoped-namespace-empty-line` requires an empty line between
//!   a file-scoped namespace and its first type, with an automatic fix

pub mod builtin;
pub mod engine;
pub mod fixes;
pub mod metadata;
pub mod outcome;

// Re-export commonly used types
pub use builtin::{
    BuiltinRules, FILE_SCOPED_NAMESPACE_EMPTY_LINE, INCLUSIVE_TERMINOLOGY, InclusivenessChecker,
    NamespaceLayoutChecker, TermEntry, TermTable,
};
pub use engine::{AnalysisUnit, FileAnalysis, RuleEngine};
pub use fixes::{EmptyLineFixer, FixProvider, apply_fixes, fix_providers};
pub use metadata::RuleMetadata;
pub use outcome::UnitOutcome;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
