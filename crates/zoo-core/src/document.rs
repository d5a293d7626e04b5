//! A parsed source file and the edit service fixes work through
//!
//! A [`Document`] owns the text, its green tree and a source map. Fixes never
//! mutate a document; they build a new root and call
//! [`Document::with_new_root`], which re-serialises the text from the tree.

use crate::cst::{GreenNode, LexerError, ParseError, SyntaxNode, TextRange, parse_cs};
use crate::diagnostics::{Location, SourceMap};
use std::ops::Range;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
    green: GreenNode,
    source_map: SourceMap,
    lexer_errors: Vec<LexerError>,
    parse_errors: Vec<ParseError>,
}

impl Document {
    /// Parse `text` as the contents of `path`
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let text = text.into();
        let parse = parse_cs(&text);

        if parse.has_errors() {
            tracing::debug!(
                "{}: {} lexer errors, {} parse errors",
                path.display(),
                parse.lexer_errors().len(),
                parse.errors().len()
            );
        }

        let lexer_errors = parse.lexer_errors().to_vec();
        let parse_errors = parse.errors().to_vec();
        Self {
            source_map: SourceMap::new(&text),
            green: parse.into_green(),
            path,
            text,
            lexer_errors,
            parse_errors,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Red tree rooted at the `SourceFile` node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn lexer_errors(&self) -> &[LexerError] {
        &self.lexer_errors
    }

    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }

    /// A document for the same path whose tree is the root of `node`
    ///
    /// Errors found when the original text was parsed are not carried over.
    pub fn with_new_root(&self, node: SyntaxNode) -> Document {
        let root = node.ancestors().last().unwrap_or_else(|| node.clone());
        let text = root.text().to_string();

        Self {
            path: self.path.clone(),
            source_map: SourceMap::new(&text),
            green: root.green().into_owned(),
            text,
            lexer_errors: Vec::new(),
            parse_errors: Vec::new(),
        }
    }

    /// Diagnostic location of `range`; `None` when it lies outside the text
    pub fn location_for(&self, range: TextRange) -> Option<Location> {
        self.location_for_span(usize::from(range.start())..usize::from(range.end()))
    }

    pub fn location_for_span(&self, span: Range<usize>) -> Option<Location> {
        if span.start > span.end
            || span.end > self.text.len()
            || !self.text.is_char_boundary(span.start)
            || !self.text.is_char_boundary(span.end)
        {
            return None;
        }
        Some(
            self.source_map
                .span_to_diagnostic_location(&span, &self.text, &self.path),
        )
    }

    /// Byte span of the full line containing `offset`, line break excluded
    pub fn line_span_at(&self, offset: usize) -> Option<Range<usize>> {
        if offset > self.text.len() {
            return None;
        }
        self.source_map
            .line_span(self.source_map.line_index(offset))
    }

    /// Text of the first line break in the document, if any
    pub fn first_line_break(&self) -> Option<&str> {
        let idx = self.text.find(['\r', '\n'])?;
        if self.text[idx..].starts_with("\r\n") {
            Some("\r\n")
        } else {
            Some(&self.text[idx..idx + 1])
        }
    }
}
