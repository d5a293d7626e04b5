//! Concrete Syntax Tree (CST) for C#
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves every byte of the source, including whitespace, line
//! breaks, comments and preprocessor directives, which enables:
//! - Rules that inspect formatting (blank lines, documentation comments)
//! - Precise autofixes that leave all untouched text byte-identical
//! - Parsing that never fails on malformed input
//!
//! ## Architecture
//!
//! The CST uses Rowan's green/red tree pattern:
//!
//! - **Green Tree**: Immutable, position-independent storage. Cheap to clone
//!   and safe to share between threads.
//! - **Red Tree**: Dynamically constructed view with parent pointers and
//!   absolute offsets. Built per thread from a green root.
//!
//! ## Trivia Handling
//!
//! - **Trailing trivia**: whitespace and comments after a token on the same
//!   line, up to and including the line break
//! - **Leading trivia**: everything else before a token, stored inside the
//!   innermost node that starts with that token
//! - **Documentation comments**: runs of `///` lines or a `/** */` block in
//!   leading position, grouped into a `DocumentationComment` node
//!
//! This enables lossless representation: `parse_cs(source).syntax().text() == source`
//!
//! ## Example
//!
//! ```rust,ignore
//! use zoo_core::cst::{parse_cs, CsSyntaxKind};
//!
//! let parse = parse_cs("namespace Zoo; // animals\nclass Keeper {}");
//! let root = parse.syntax();
//!
//! assert_eq!(root.text().to_string(), "namespace Zoo; // animals\nclass Keeper {}");
//!
//! for element in root.descendants_with_tokens() {
//!     if let Some(comment) = element.as_token() {
//!         if comment.kind() == CsSyntaxKind::CommentLine {
//!             println!("Found comment: {}", comment.text());
//!         }
//!     }
//! }
//! ```

mod builder;
mod language;
mod lexer;
mod nodes;
mod parser;
mod syntax_kind;

pub mod ast;
pub mod trivia;

pub use builder::CstBuilder;
pub use language::CsLanguage;
pub use lexer::{CstLexResult, CstSpan, CstToken, LexerError, lex_with_trivia};
pub use nodes::*;
pub use parser::{Parse, ParseError, parse_cs};
pub use syntax_kind::CsSyntaxKind;
pub use trivia::{
    TriviaPiece, documentation_comment, first_leading_trivia, leading_trivia, trailing_trivia,
};

use std::fmt::Write;

/// Render a tree as an indented `Kind@range` listing, tokens with their text
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut depth = 0usize;

    for event in node.preorder_with_tokens() {
        match event {
            WalkEvent::Enter(element) => {
                let indent = "  ".repeat(depth);
                match element {
                    NodeOrToken::Node(node) => {
                        let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
                        depth += 1;
                    }
                    NodeOrToken::Token(token) => {
                        let _ = writeln!(
                            out,
                            "{indent}{:?}@{:?} {:?}",
                            token.kind(),
                            token.text_range(),
                            token.text()
                        );
                    }
                }
            }
            WalkEvent::Leave(NodeOrToken::Node(_)) => depth = depth.saturating_sub(1),
            WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }

    out
}

#[cfg(test)]
mod tests;
