//! Blank line between a file-scoped namespace and its first type

use crate::metadata::RuleMetadata;
use crate::outcome::UnitOutcome;
use zoo_core::cst::ast::{AstNode, FileScopedNamespace};
use zoo_core::cst::trivia::{first_leading_trivia, first_significant_token};
use zoo_core::cst::SyntaxNode;
use zoo_core::{CodeSuggestion, Diagnostic, DiagnosticCategory, Document, Severity};

/// Rule ID for the missing blank line after `namespace X;`
pub const FILE_SCOPED_NAMESPACE_EMPTY_LINE: &str = "style/file-scoped-namespace-empty-line";

/// Title of the fix that inserts the blank line
pub const FIX_TITLE: &str = "Insert empty line after file-scoped namespace";

/// Equivalence key shared by every instance of the fix
pub const FIX_EQUIVALENCE_KEY: &str = "InsertEmptyLineAfterFileScopedNamespace";

const MESSAGE: &str = "File-scoped namespace '{0}' should be followed by an empty line";

pub fn metadata() -> RuleMetadata {
    RuleMetadata {
        id: FILE_SCOPED_NAMESPACE_EMPTY_LINE,
        title: "File-scoped namespace should be followed by an empty line",
        description: "Requires the first type declared in a file-scoped namespace to be \
                      separated from the namespace declaration by an empty line.",
        message_template: MESSAGE,
        category: DiagnosticCategory::Style,
        default_severity: Severity::Warning,
        enabled_by_default: true,
        fixable: true,
        help_url: "https://github.com/ondrej-zoo/zoo/blob/main/docs/rules/file-scoped-namespace-empty-line.md",
    }
}

/// Whether the first type member of `namespace` starts right after the header
///
/// Only the first class, struct, interface, record or enum counts. Layout is
/// fine when its first leading trivia element is a line break, or when the
/// namespace declares no type at all.
pub fn needs_empty_line(namespace: &FileScopedNamespace) -> bool {
    let Some(first_type) = namespace.first_type_member() else {
        return false;
    };
    !first_leading_trivia(first_type.syntax()).is_some_and(|trivia| trivia.is_end_of_line())
}

/// Checks the layout of file-scoped namespace declarations
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceLayoutChecker;

impl NamespaceLayoutChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check `node`; anything other than a file-scoped namespace is clean
    ///
    /// The diagnostic covers the whole line the declaration starts on, line
    /// break excluded.
    pub fn check(&self, node: &SyntaxNode, document: &Document) -> UnitOutcome {
        let Some(namespace) = FileScopedNamespace::cast(node.clone()) else {
            return UnitOutcome::Clean;
        };
        if !needs_empty_line(&namespace) {
            return UnitOutcome::Clean;
        }

        let Some(name) = namespace.name() else {
            return UnitOutcome::skipped("file-scoped namespace has no name");
        };
        let Some(keyword) = first_significant_token(node) else {
            return UnitOutcome::skipped(format!("namespace '{name}' has no tokens"));
        };

        let start = usize::from(keyword.text_range().start());
        let Some(location) = document
            .line_span_at(start)
            .and_then(|line| document.location_for_span(line))
        else {
            return UnitOutcome::skipped(format!(
                "namespace '{name}' is located outside {}",
                document.path().display()
            ));
        };

        UnitOutcome::Reported(
            Diagnostic::from_template(
                FILE_SCOPED_NAMESPACE_EMPTY_LINE,
                Severity::Warning,
                MESSAGE,
                vec![name],
                location,
            )
            .with_category(DiagnosticCategory::Style)
            .with_suggestion(CodeSuggestion::safe(FIX_TITLE, FIX_EQUIVALENCE_KEY)),
        )
    }
}
