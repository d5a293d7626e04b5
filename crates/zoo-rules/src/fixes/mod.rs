//! Automatic fixes
//!
//! A fix provider turns a diagnostic into a rewritten document. Providers
//! never edit text directly: they replace a subtree and let
//! [`Document::with_new_root`] serialise the new tree.

pub mod empty_line;

pub use empty_line::EmptyLineFixer;

use std::cmp::Reverse;
use tracing::{debug, trace};
use zoo_core::{Diagnostic, Document, FixResult};

/// Produces fixed documents for the diagnostics of particular rules
pub trait FixProvider: Send + Sync {
    /// Rule ids whose diagnostics this provider can fix
    fn fixable_rule_ids(&self) -> &'static [&'static str];

    fn title(&self) -> &'static str;

    /// Key identifying the fix across diagnostics, for batch application
    fn equivalence_key(&self) -> &'static str;

    /// Fixed version of `document`
    ///
    /// Returns an unchanged copy when `diagnostic` no longer points at
    /// something this provider can fix.
    fn fix(&self, document: &Document, diagnostic: &Diagnostic) -> Document;
}

/// All built-in fix providers
pub fn fix_providers() -> Vec<Box<dyn FixProvider>> {
    vec![Box::new(EmptyLineFixer::new())]
}

/// Provider that can fix `rule_id`, if any
pub fn provider_for<'p>(
    providers: &'p [Box<dyn FixProvider>],
    rule_id: &str,
) -> Option<&'p dyn FixProvider> {
    providers
        .iter()
        .find(|provider| provider.fixable_rule_ids().contains(&rule_id))
        .map(|provider| provider.as_ref())
}

/// Apply every fixable diagnostic of one document
///
/// Diagnostics are applied from the end of the file backwards, one at a
/// time, and the text is re-parsed after each change so every fix sees a
/// fresh tree. Diagnostics that no longer apply are skipped.
pub fn apply_fixes(
    document: &Document,
    diagnostics: &[Diagnostic],
    providers: &[Box<dyn FixProvider>],
) -> FixResult {
    let mut ordered: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|diagnostic| provider_for(providers, &diagnostic.rule_id).is_some())
        .collect();
    ordered.sort_by_key(|diagnostic| Reverse(diagnostic.location.offset));

    let mut current = document.clone();
    let mut applied_count = 0;

    for diagnostic in ordered {
        let Some(provider) = provider_for(providers, &diagnostic.rule_id) else {
            continue;
        };
        let fixed = provider.fix(&current, diagnostic);
        if fixed.text() == current.text() {
            trace!("Fix for {} at {} did not apply", diagnostic.rule_id, diagnostic.location);
            continue;
        }
        applied_count += 1;
        current = Document::parse(current.path(), fixed.text());
    }

    if applied_count == 0 {
        return FixResult::unchanged(document.path(), document.text());
    }

    debug!(
        "{} fix(es) ready for {}",
        applied_count,
        document.path().display()
    );
    FixResult {
        file: document.path().to_path_buf(),
        applied_count,
        original_content: document.text().to_string(),
        modified_content: Some(current.text().to_string()),
    }
}
