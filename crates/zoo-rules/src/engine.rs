//! Rule engine
//!
//! The engine turns a document into analysis units (the symbols of its
//! symbol table, then every syntax node in preorder) and dispatches each unit
//! to the checkers registered for its kind. Every check yields a
//! [`UnitOutcome`]; skipped units are logged and counted, and never stop the
//! rest of the file.

use crate::builtin::inclusiveness::{self, INCLUSIVE_TERMINOLOGY, InclusivenessChecker};
use crate::builtin::namespace_layout::{FILE_SCOPED_NAMESPACE_EMPTY_LINE, NamespaceLayoutChecker};
use crate::builtin::{BuiltinRules, TermTable};
use crate::fixes::{FixProvider, apply_fixes, fix_providers};
use crate::metadata::RuleMetadata;
use crate::outcome::UnitOutcome;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, trace, warn};
use zoo_core::cst::{CsSyntaxKind, SyntaxNode};
use zoo_core::{
    DefaultDiagnosticCollector, Diagnostic, DiagnosticCollector, Document, FixResult, Result,
    Severity, Symbol, SymbolKind, SymbolTable, ZooConfig,
};

/// Something a checker runs against
#[derive(Debug, Clone)]
pub enum AnalysisUnit<'a> {
    Symbol(&'a Symbol),
    Node(SyntaxNode),
}

impl fmt::Display for AnalysisUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisUnit::Symbol(symbol) => write!(f, "{} '{}'", symbol.kind, symbol.name),
            AnalysisUnit::Node(node) => write!(f, "{:?}@{:?}", node.kind(), node.text_range()),
        }
    }
}

/// Diagnostics and unit counts for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub path: PathBuf,
    /// Sorted by position, then rule id
    pub diagnostics: Vec<Diagnostic>,
    /// Checks run
    pub checked: usize,
    /// Checks that could not analyse their unit
    pub skipped: usize,
}

/// Runs the built-in rules with the configured severities and terms
pub struct RuleEngine {
    terms: TermTable,
    /// Effective severity per rule; `None` when the rule is off
    severities: HashMap<&'static str, Option<Severity>>,
    providers: Vec<Box<dyn FixProvider>>,
}

impl RuleEngine {
    /// Engine with the built-in terms and default severities
    pub fn new() -> Self {
        Self::with_terms(TermTable::builtin())
    }

    pub fn with_terms(terms: TermTable) -> Self {
        let severities = BuiltinRules::all()
            .into_iter()
            .map(|rule| (rule.id, default_severity(&rule)))
            .collect();
        Self {
            terms,
            severities,
            providers: fix_providers(),
        }
    }

    /// Engine configured from `[rules]` and `[terminology]`
    ///
    /// Unknown rule ids and invalid term tables are errors.
    pub fn from_config(config: &ZooConfig) -> Result<Self> {
        config.validate_rules(&BuiltinRules::ids())?;
        let mut engine = Self::with_terms(TermTable::with_configured(&config.terminology)?);

        for rule in BuiltinRules::all() {
            if let Some(configured) = config.rule_severity(rule.id) {
                debug!("Rule {} configured as {:?}", rule.id, configured);
                engine.severities.insert(rule.id, configured.to_severity());
            }
        }
        Ok(engine)
    }

    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    pub fn rules(&self) -> Vec<RuleMetadata> {
        BuiltinRules::all()
    }

    /// Effective severity of `rule_id`, `None` when off or unknown
    pub fn severity_of(&self, rule_id: &str) -> Option<Severity> {
        self.severities.get(rule_id).copied().flatten()
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.severity_of(rule_id).is_some()
    }

    /// Run every enabled check registered for the unit's kind
    pub fn check_unit(
        &self,
        unit: &AnalysisUnit<'_>,
        document: &Document,
    ) -> Vec<(&'static str, UnitOutcome)> {
        let mut outcomes = Vec::new();
        let inclusiveness = InclusivenessChecker::new(&self.terms);

        match unit {
            AnalysisUnit::Symbol(symbol) => match symbol.kind {
                SymbolKind::Namespace
                | SymbolKind::NamedType
                | SymbolKind::Method
                | SymbolKind::Property
                | SymbolKind::Field
                | SymbolKind::Event
                | SymbolKind::Parameter => {
                    if self.is_enabled(INCLUSIVE_TERMINOLOGY) {
                        outcomes.push((
                            INCLUSIVE_TERMINOLOGY,
                            inclusiveness.check_symbol(symbol, document),
                        ));
                    }
                }
            },
            AnalysisUnit::Node(node) => {
                if node.kind() == CsSyntaxKind::FileScopedNamespaceDeclaration
                    && self.is_enabled(FILE_SCOPED_NAMESPACE_EMPTY_LINE)
                {
                    outcomes.push((
                        FILE_SCOPED_NAMESPACE_EMPTY_LINE,
                        NamespaceLayoutChecker::new().check(node, document),
                    ));
                }
                if inclusiveness::is_documentable(node.kind())
                    && self.is_enabled(INCLUSIVE_TERMINOLOGY)
                {
                    outcomes.push((
                        INCLUSIVE_TERMINOLOGY,
                        inclusiveness.check_documentation(node, document),
                    ));
                }
            }
        }

        outcomes
    }

    /// Analyse one document
    pub fn analyze(&self, document: &Document) -> FileAnalysis {
        let root = document.syntax();
        let symbols = SymbolTable::build(&root);
        let units = symbols
            .symbols()
            .iter()
            .map(AnalysisUnit::Symbol)
            .chain(root.descendants().map(AnalysisUnit::Node));
        self.analyze_units(document, units)
    }

    /// Analyse the given units of `document`
    ///
    /// A documentation block is reported at most once per file, however many
    /// nodes it leads.
    pub fn analyze_units<'a>(
        &self,
        document: &Document,
        units: impl IntoIterator<Item = AnalysisUnit<'a>>,
    ) -> FileAnalysis {
        let mut collector = DefaultDiagnosticCollector::new();
        let mut reported_docs = HashSet::new();
        let mut checked = 0;
        let mut skipped = 0;

        for unit in units {
            for (rule_id, outcome) in self.check_unit(&unit, document) {
                checked += 1;
                trace!("{} on {}: {:?}", rule_id, unit, outcome);

                match outcome {
                    UnitOutcome::Reported(diagnostic) => {
                        if matches!(unit, AnalysisUnit::Node(_))
                            && rule_id == INCLUSIVE_TERMINOLOGY
                            && !reported_docs.insert(diagnostic.span())
                        {
                            continue;
                        }
                        let Some(severity) = self.severity_of(rule_id) else {
                            continue;
                        };
                        collector.collect(diagnostic.with_severity(severity));
                    }
                    UnitOutcome::Clean => {}
                    UnitOutcome::Skipped { reason } => {
                        skipped += 1;
                        warn!(
                            "Skipped {} for {} in {}: {}",
                            rule_id,
                            unit,
                            document.path().display(),
                            reason
                        );
                    }
                }
            }
        }

        collector.sort_by_location();
        let diagnostics = collector.into_diagnostics();
        debug!(
            "{}: {} diagnostics from {} checks ({} skipped)",
            document.path().display(),
            diagnostics.len(),
            checked,
            skipped
        );

        FileAnalysis {
            path: document.path().to_path_buf(),
            diagnostics,
            checked,
            skipped,
        }
    }

    /// Analyse documents in parallel, keeping their order
    pub fn analyze_all(&self, documents: &[Document]) -> Vec<FileAnalysis> {
        documents
            .par_iter()
            .map(|document| self.analyze(document))
            .collect()
    }

    /// Apply the fixes available for `diagnostics`
    pub fn fix(&self, document: &Document, diagnostics: &[Diagnostic]) -> FixResult {
        apply_fixes(document, diagnostics, &self.providers)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn default_severity(rule: &RuleMetadata) -> Option<Severity> {
    rule.enabled_by_default.then_some(rule.default_severity)
}
