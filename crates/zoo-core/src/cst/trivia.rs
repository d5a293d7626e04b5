//! Trivia access over the CST
//!
//! Trivia lives in the tree as ordinary tokens. Leading trivia of a node is
//! every trivia element that precedes its first significant token (the parser
//! emits it inside the node); trailing trivia of a token is the run of trivia
//! siblings after it, up to and including the first line break.

use super::{CsSyntaxKind, SyntaxElement, SyntaxNode, SyntaxToken, TextRange};
use rowan::WalkEvent;

/// One leading trivia element: a plain trivia token or a documentation block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPiece {
    Token(SyntaxToken),
    Documentation(SyntaxNode),
}

impl TriviaPiece {
    pub fn kind(&self) -> CsSyntaxKind {
        match self {
            Self::Token(token) => token.kind(),
            Self::Documentation(node) => node.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            Self::Token(token) => token.text_range(),
            Self::Documentation(node) => node.text_range(),
        }
    }

    /// Full text, comment markers included
    pub fn text(&self) -> String {
        match self {
            Self::Token(token) => token.text().to_string(),
            Self::Documentation(node) => node.text().to_string(),
        }
    }

    pub fn is_end_of_line(&self) -> bool {
        self.kind() == CsSyntaxKind::Newline
    }

    pub fn as_documentation(&self) -> Option<&SyntaxNode> {
        match self {
            Self::Documentation(node) => Some(node),
            Self::Token(_) => None,
        }
    }
}

/// Leading trivia of `node`, in source order
pub fn leading_trivia(node: &SyntaxNode) -> Vec<TriviaPiece> {
    let mut pieces = Vec::new();
    let mut preorder = node.preorder_with_tokens();

    while let Some(event) = preorder.next() {
        let WalkEvent::Enter(element) = event else {
            continue;
        };
        match element {
            SyntaxElement::Node(child) if child.kind() == CsSyntaxKind::DocumentationComment => {
                preorder.skip_subtree();
                pieces.push(TriviaPiece::Documentation(child));
            }
            SyntaxElement::Node(_) => {}
            SyntaxElement::Token(token) if token.kind().is_trivia() => {
                pieces.push(TriviaPiece::Token(token));
            }
            SyntaxElement::Token(_) => break,
        }
    }

    pieces
}

/// First leading trivia element of `node`, if any
pub fn first_leading_trivia(node: &SyntaxNode) -> Option<TriviaPiece> {
    leading_trivia(node).into_iter().next()
}

/// The first documentation block among the leading trivia of `node`
pub fn documentation_comment(node: &SyntaxNode) -> Option<SyntaxNode> {
    leading_trivia(node)
        .into_iter()
        .find_map(|piece| match piece {
            TriviaPiece::Documentation(doc) => Some(doc),
            TriviaPiece::Token(_) => None,
        })
}

/// Trailing trivia of `token`: trivia siblings on the same line, up to and
/// including the first line break
pub fn trailing_trivia(token: &SyntaxToken) -> Vec<SyntaxToken> {
    let mut trivia = Vec::new();
    let mut next = token.next_sibling_or_token();

    while let Some(SyntaxElement::Token(sibling)) = next {
        if !sibling.kind().is_trivia() {
            break;
        }
        let ends_line = sibling.kind() == CsSyntaxKind::Newline;
        next = sibling.next_sibling_or_token();
        trivia.push(sibling);
        if ends_line {
            break;
        }
    }

    trivia
}

/// First significant (non-trivia) token inside `node`
pub fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
}
