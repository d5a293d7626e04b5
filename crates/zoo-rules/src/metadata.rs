//! Rule metadata

use serde::Serialize;
use zoo_core::{DiagnosticCategory, Severity};

/// Fixed description of a rule, as shown by `zoo rules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    /// Unique identifier for the rule
    pub id: &'static str,
    /// Short human-readable title
    pub title: &'static str,
    /// What the rule checks and why
    pub description: &'static str,
    /// Diagnostic message with `{0}`, `{1}` placeholders
    pub message_template: &'static str,
    pub category: DiagnosticCategory,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
    /// Whether a fix provider exists for the rule
    pub fixable: bool,
    pub help_url: &'static str,
}

impl RuleMetadata {
    /// Category segment of the id (`style` for `style/inclusive-terminology`)
    pub fn group(&self) -> &'static str {
        self.id.split_once('/').map_or(self.id, |(group, _)| group)
    }
}
