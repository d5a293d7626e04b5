//! Configuration types for zoo
//!
//! The same structure is read from `.zoorc.toml` and `.zoorc.json`.

use crate::diagnostics::Severity;
use crate::error::ZooError;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ZooConfig {
    /// Which files `zoo lint` picks up
    pub files: FilesConfiguration,

    /// Per-rule severity overrides, keyed by rule id
    pub rules: BTreeMap<String, RuleSeverity>,

    /// Extra non-inclusive terms
    pub terminology: TerminologyConfiguration,
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Informational message
    Info,
    /// Warning (doesn't fail the run)
    #[serde(alias = "warning")]
    Warn,
    /// Error (fails the run)
    Error,
}

impl RuleSeverity {
    /// Diagnostic severity, or `None` when the rule is off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }
}

/// Files configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfiguration {
    /// Glob patterns of files to lint
    pub include: Vec<String>,

    /// Glob patterns of files to skip
    pub exclude: Vec<String>,
}

impl Default for FilesConfiguration {
    fn default() -> Self {
        Self {
            include: vec!["**/*.cs".to_string()],
            exclude: vec!["**/bin/**".to_string(), "**/obj/**".to_string()],
        }
    }
}

/// Terminology configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TerminologyConfiguration {
    /// Appended after the built-in terms, in this order
    pub terms: Vec<TermConfiguration>,
}

/// One configured term and the phrase suggested instead
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TermConfiguration {
    pub term: String,
    pub suggestion: String,
}

impl ZooConfig {
    /// Parse TOML configuration text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ZooError::config_error(format!("Invalid TOML: {e}")))
    }

    /// Parse JSON configuration text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ZooError::config_error(format!("Invalid JSON: {e}")))
    }

    /// Load a configuration file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ZooError::io_error(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }

    /// Configured severity for `rule_id`, if any
    pub fn rule_severity(&self, rule_id: &str) -> Option<RuleSeverity> {
        self.rules.get(rule_id).copied()
    }

    /// Reject rule ids that are not in `known`
    pub fn validate_rules(&self, known: &[&str]) -> Result<()> {
        for rule_id in self.rules.keys() {
            if !known.contains(&rule_id.as_str()) {
                return Err(ZooError::config_error(format!(
                    "Unknown rule '{rule_id}' in [rules]; known rules: {}",
                    known.join(", ")
                )));
            }
        }
        Ok(())
    }
}
