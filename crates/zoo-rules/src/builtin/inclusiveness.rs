//! Inclusive terminology in identifiers and documentation comments

use super::terms::TermTable;
use crate::metadata::RuleMetadata;
use crate::outcome::UnitOutcome;
use zoo_core::cst::{CsSyntaxKind, SyntaxNode, documentation_comment};
use zoo_core::{Diagnostic, DiagnosticCategory, Document, Location, Severity, Symbol};

/// Rule ID for non-inclusive terminology
pub const INCLUSIVE_TERMINOLOGY: &str = "style/inclusive-terminology";

const MESSAGE: &str = "'{0}' contains non-inclusive terminology; consider using: {1}";

pub fn metadata() -> RuleMetadata {
    RuleMetadata {
        id: INCLUSIVE_TERMINOLOGY,
        title: "Use inclusive terminology",
        description: "Flags identifiers and documentation comments that contain non-inclusive \
                      terms such as 'whitelist' or 'blacklist' and suggests alternatives. Terms \
                      shorter than five characters only match a whole name.",
        message_template: MESSAGE,
        category: DiagnosticCategory::Style,
        default_severity: Severity::Warning,
        enabled_by_default: true,
        fixable: false,
        help_url: "https://github.com/ondrej-zoo/zoo/blob/main/docs/rules/inclusive-terminology.md",
    }
}

/// Node kinds whose leading documentation comment is checked
pub fn is_documentable(kind: CsSyntaxKind) -> bool {
    kind.is_type_declaration()
        || kind.is_accessor()
        || matches!(
            kind,
            CsSyntaxKind::VariableDeclaration
                | CsSyntaxKind::NamespaceDeclaration
                | CsSyntaxKind::FileScopedNamespaceDeclaration
                | CsSyntaxKind::DelegateDeclaration
                | CsSyntaxKind::EnumMemberDeclaration
                | CsSyntaxKind::FieldDeclaration
                | CsSyntaxKind::EventFieldDeclaration
                | CsSyntaxKind::MethodDeclaration
                | CsSyntaxKind::OperatorDeclaration
                | CsSyntaxKind::ConversionOperatorDeclaration
                | CsSyntaxKind::ConstructorDeclaration
                | CsSyntaxKind::DestructorDeclaration
                | CsSyntaxKind::PropertyDeclaration
                | CsSyntaxKind::EventDeclaration
                | CsSyntaxKind::IndexerDeclaration
        )
}

/// Scans symbol names and documentation comments against a [`TermTable`]
#[derive(Debug, Clone, Copy)]
pub struct InclusivenessChecker<'t> {
    terms: &'t TermTable,
}

impl<'t> InclusivenessChecker<'t> {
    pub fn new(terms: &'t TermTable) -> Self {
        Self { terms }
    }

    /// Check a symbol's name; reported at its primary declaration
    pub fn check_symbol(&self, symbol: &Symbol, document: &Document) -> UnitOutcome {
        let Some(entry) = self.terms.first_match(&symbol.name) else {
            return UnitOutcome::Clean;
        };

        let Some(range) = symbol.primary_location() else {
            return UnitOutcome::skipped(format!(
                "{} '{}' has no source location",
                symbol.kind, symbol.name
            ));
        };
        let Some(location) = document.location_for(range) else {
            return UnitOutcome::skipped(format!(
                "{} '{}' is located outside {}",
                symbol.kind,
                symbol.name,
                document.path().display()
            ));
        };

        UnitOutcome::Reported(diagnostic(
            vec![symbol.name.clone(), entry.suggestion.clone()],
            location,
        ))
    }

    /// Check the documentation comment attached to `node`
    ///
    /// The matched term, not the declaration name, is the first message
    /// argument. Nodes without documentation are clean.
    pub fn check_documentation(&self, node: &SyntaxNode, document: &Document) -> UnitOutcome {
        let Some(block) = documentation_comment(node) else {
            return UnitOutcome::Clean;
        };

        let text = block.text().to_string();
        let Some(entry) = self.terms.first_match(&text) else {
            return UnitOutcome::Clean;
        };

        let Some(location) = document.location_for(block.text_range()) else {
            return UnitOutcome::skipped(format!(
                "documentation comment of {:?} is located outside {}",
                node.kind(),
                document.path().display()
            ));
        };

        UnitOutcome::Reported(diagnostic(
            vec![entry.term.clone(), entry.suggestion.clone()],
            location,
        ))
    }
}

fn diagnostic(args: Vec<String>, location: Location) -> Diagnostic {
    Diagnostic::from_template(
        INCLUSIVE_TERMINOLOGY,
        Severity::Warning,
        MESSAGE,
        args,
        location,
    )
    .with_category(DiagnosticCategory::Style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoo_core::cst::{TextRange, TextSize};
    use zoo_core::{SymbolKind, SymbolTable};

    fn check_symbols(source: &str) -> Vec<UnitOutcome> {
        let document = Document::parse("Zoo.cs", source);
        let table = SymbolTable::build(&document.syntax());
        let terms = TermTable::builtin();
        let checker = InclusivenessChecker::new(&terms);
        table
            .symbols()
            .iter()
            .map(|symbol| checker.check_symbol(symbol, &document))
            .collect()
    }

    fn reported(outcomes: Vec<UnitOutcome>) -> Vec<Diagnostic> {
        outcomes
            .into_iter()
            .filter_map(UnitOutcome::into_diagnostic)
            .collect()
    }

    #[test]
    fn test_symbol_with_term_reports_once() {
        let diagnostics = reported(check_symbols("class BlackList {}"));

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.rule_id, INCLUSIVE_TERMINOLOGY);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(
            diagnostic.message_args,
            vec!["BlackList", "deny list, blocklist, exclude list"]
        );
        assert_eq!(
            diagnostic.message,
            "'BlackList' contains non-inclusive terminology; consider using: deny list, blocklist, exclude list"
        );
        assert_eq!((diagnostic.location.line, diagnostic.location.column), (1, 7));
        assert_eq!(diagnostic.span(), 6..15);
    }

    #[test]
    fn test_clean_symbol() {
        let outcomes = check_symbols("class SomethingElse {}");
        assert_eq!(outcomes, vec![UnitOutcome::Clean]);
    }

    #[test]
    fn test_every_symbol_kind_is_checked() {
        let source = r#"namespace Whitelist.Api;

class Guard
{
    int blacklistCount;
    event System.Action WhitelistChanged;
    string BlacklistName { get; set; }
    void AddToWhitelist(string whitelistEntry) {}
}
"#;
        let names: Vec<String> = reported(check_symbols(source))
            .into_iter()
            .map(|d| d.message_args[0].clone())
            .collect();

        assert_eq!(
            names,
            vec![
                "Whitelist",
                "blacklistCount",
                "WhitelistChanged",
                "BlacklistName",
                "AddToWhitelist",
                "whitelistEntry",
            ]
        );
    }

    #[test]
    fn test_symbol_without_location_is_skipped() {
        let document = Document::parse("Zoo.cs", "class Keeper {}");
        let terms = TermTable::builtin();
        let checker = InclusivenessChecker::new(&terms);

        let orphan = Symbol {
            name: "Whitelist".to_string(),
            kind: SymbolKind::NamedType,
            container: None,
            locations: Vec::new(),
        };
        assert!(checker.check_symbol(&orphan, &document).is_skipped());

        let outside = Symbol {
            locations: vec![TextRange::new(TextSize::from(100), TextSize::from(109))],
            ..orphan
        };
        assert!(checker.check_symbol(&outside, &document).is_skipped());
    }

    #[test]
    fn test_documentation_reports_matched_term_at_block() {
        let source = "/// Keeps a whitelist of keepers.\n/// Second line.\nclass Keeper {}\n";
        let document = Document::parse("Zoo.cs", source);
        let class = document
            .syntax()
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ClassDeclaration)
            .expect("class");

        let terms = TermTable::builtin();
        let outcome = InclusivenessChecker::new(&terms).check_documentation(&class, &document);
        let diagnostic = outcome.into_diagnostic().expect("reported");

        assert_eq!(
            diagnostic.message_args,
            vec!["whitelist", "allow list, access list, permit"]
        );
        assert_eq!(diagnostic.span(), 0..51);
        assert_eq!(diagnostic.location.line, 1);
    }

    #[test]
    fn test_node_without_documentation_is_clean() {
        let source = "// whitelist in a plain comment\nclass Keeper {}\n";
        let document = Document::parse("Zoo.cs", source);
        let class = document
            .syntax()
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ClassDeclaration)
            .expect("class");

        let terms = TermTable::builtin();
        let outcome = InclusivenessChecker::new(&terms).check_documentation(&class, &document);
        assert_eq!(outcome, UnitOutcome::Clean);
    }

    #[test]
    fn test_documentable_kinds() {
        assert!(is_documentable(CsSyntaxKind::RecordStructDeclaration));
        assert!(is_documentable(CsSyntaxKind::InitAccessorDeclaration));
        assert!(is_documentable(CsSyntaxKind::VariableDeclaration));
        assert!(!is_documentable(CsSyntaxKind::Parameter));
        assert!(!is_documentable(CsSyntaxKind::UsingDirective));
    }
}
