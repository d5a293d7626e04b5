//! Forbidden terms and their suggested replacements

use super::matcher;
use std::collections::HashSet;
use zoo_core::config::TerminologyConfiguration;
use zoo_core::{Result, ZooError};

/// Built-in terms, in lookup order
pub const BUILTIN_TERMS: &[(&str, &str)] = &[
    ("whitelist", "allow list, access list, permit"),
    ("white list", "allow list, access list, permit"),
    ("blacklist", "deny list, blocklist, exclude list"),
    ("black list", "deny list, blocklist, exclude list"),
];

/// A forbidden term and the comma-separated phrases to use instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub term: String,
    pub suggestion: String,
}

impl TermEntry {
    pub fn new(term: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Ordered, read-only table of forbidden terms
///
/// Terms are non-empty and unique ignoring case. Lookup walks the table in
/// order and the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermTable {
    entries: Vec<TermEntry>,
}

impl TermTable {
    /// Build a table, rejecting empty or duplicate terms
    pub fn new(entries: Vec<TermEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.term.trim().is_empty() {
                return Err(ZooError::term_table_error("term must not be empty"));
            }
            if !seen.insert(entry.term.to_lowercase()) {
                return Err(ZooError::term_table_error(format!(
                    "duplicate term '{}'",
                    entry.term
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The four built-in terms
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Built-in terms followed by the configured ones
    pub fn with_configured(terminology: &TerminologyConfiguration) -> Result<Self> {
        let mut entries = builtin_entries();
        entries.extend(
            terminology
                .terms
                .iter()
                .map(|t| TermEntry::new(&t.term, &t.suggestion)),
        );
        let table = Self::new(entries)?;
        tracing::debug!(
            "Term table has {} entries ({} configured)",
            table.len(),
            terminology.terms.len()
        );
        Ok(table)
    }

    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose term occurs in `text`
    pub fn first_match(&self, text: &str) -> Option<&TermEntry> {
        self.entries
            .iter()
            .find(|entry| matcher::is_match(text, &entry.term))
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entries() -> Vec<TermEntry> {
    BUILTIN_TERMS
        .iter()
        .map(|(term, suggestion)| TermEntry::new(*term, *suggestion))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoo_core::ErrorKind;
    use zoo_core::config::TermConfiguration;

    fn configured(terms: &[(&str, &str)]) -> TerminologyConfiguration {
        TerminologyConfiguration {
            terms: terms
                .iter()
                .map(|(term, suggestion)| TermConfiguration {
                    term: term.to_string(),
                    suggestion: suggestion.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_builtin_order() {
        let table = TermTable::builtin();
        let terms: Vec<&str> = table.entries().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["whitelist", "white list", "blacklist", "black list"]);
    }

    #[test]
    fn test_first_match_wins() {
        let table = TermTable::builtin();
        let entry = table
            .first_match("WhitelistOrBlacklist")
            .expect("match");
        assert_eq!(entry.term, "whitelist");

        let entry = table.first_match("BlackList").expect("match");
        assert_eq!(entry.suggestion, "deny list, blocklist, exclude list");

        assert!(table.first_match("SomethingElse").is_none());
    }

    #[test]
    fn test_configured_terms_follow_builtins() {
        let table = TermTable::with_configured(&configured(&[("master", "primary, main")]))
            .expect("valid table");
        assert_eq!(table.len(), 5);
        assert_eq!(table.entries()[4].term, "master");
        assert_eq!(
            table.first_match("MasterBranch").map(|e| e.suggestion.as_str()),
            Some("primary, main")
        );
    }

    #[test]
    fn test_duplicate_terms_are_rejected_ignoring_case() {
        let err = TermTable::with_configured(&configured(&[("WhiteList", "allow list")]))
            .expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::TermTable);
        assert!(err.to_string().contains("WhiteList"));
    }

    #[test]
    fn test_empty_terms_are_rejected() {
        let err = TermTable::new(vec![TermEntry::new("  ", "anything")]).expect_err("empty");
        assert_eq!(err.kind(), ErrorKind::TermTable);
    }
}
