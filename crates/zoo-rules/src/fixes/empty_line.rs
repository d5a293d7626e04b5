//! Inserts the missing blank line after a file-scoped namespace header

use super::FixProvider;
use crate::builtin::namespace_layout::{
    FILE_SCOPED_NAMESPACE_EMPTY_LINE, FIX_EQUIVALENCE_KEY, FIX_TITLE, needs_empty_line,
};
use std::ops::Range;
use tracing::debug;
use zoo_core::cst::ast::{AstNode, FileScopedNamespace};
use zoo_core::cst::{
    CsSyntaxKind, GreenToken, NodeOrToken, SyntaxNode, TextRange, TextSize, trailing_trivia,
};
use zoo_core::{Diagnostic, Document};

/// Fix for `style/file-scoped-namespace-empty-line`
///
/// Appends one line break to the trailing trivia of the namespace's `;`.
/// The line break copies the one already ending the header line, falling
/// back to the first line break of the file and then to `\n`. Every other
/// byte of the document is left as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLineFixer;

impl EmptyLineFixer {
    pub fn new() -> Self {
        Self
    }
}

impl FixProvider for EmptyLineFixer {
    fn fixable_rule_ids(&self) -> &'static [&'static str] {
        &[FILE_SCOPED_NAMESPACE_EMPTY_LINE]
    }

    fn title(&self) -> &'static str {
        FIX_TITLE
    }

    fn equivalence_key(&self) -> &'static str {
        FIX_EQUIVALENCE_KEY
    }

    fn fix(&self, document: &Document, diagnostic: &Diagnostic) -> Document {
        let root = document.syntax();
        let Some(namespace) = namespace_at(&root, diagnostic.span()) else {
            debug!(
                "No file-scoped namespace at {}, leaving document unchanged",
                diagnostic.location
            );
            return document.clone();
        };
        if !needs_empty_line(&namespace) {
            return document.clone();
        }
        let Some(semicolon) = namespace.semicolon() else {
            return document.clone();
        };

        let trailing = trailing_trivia(&semicolon);
        let line_break = trailing
            .last()
            .filter(|token| token.kind() == CsSyntaxKind::Newline)
            .map(|token| token.text().to_string())
            .or_else(|| document.first_line_break().map(str::to_string))
            .unwrap_or_else(|| "\n".to_string());

        let anchor = trailing.last().map_or(semicolon.index(), |token| token.index());
        let token = GreenToken::new(CsSyntaxKind::Newline.into(), &line_break);
        let green = namespace
            .syntax()
            .green()
            .insert_child(anchor + 1, NodeOrToken::Token(token));

        let new_root = namespace.syntax().replace_with(green);
        document.with_new_root(SyntaxNode::new_root(new_root))
    }
}

/// File-scoped namespace at `span`
///
/// Starts from the innermost element covering the span and climbs through
/// ancestors that cover exactly the same range.
fn namespace_at(root: &SyntaxNode, span: Range<usize>) -> Option<FileScopedNamespace> {
    if span.start > span.end {
        return None;
    }
    let range = TextRange::new(
        TextSize::try_from(span.start).ok()?,
        TextSize::try_from(span.end).ok()?,
    );
    if !root.text_range().contains_range(range) {
        return None;
    }

    let mut node = match root.covering_element(range) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent()?,
    };
    loop {
        if let Some(namespace) = FileScopedNamespace::cast(node.clone()) {
            return Some(namespace);
        }
        match node.parent() {
            Some(parent) if parent.text_range() == node.text_range() => node = parent,
            _ => return None,
        }
    }
}
