//! Type aliases for C# CST nodes
//!
//! These are Rowan's generic tree types parameterized with [`CsLanguage`].
//! Red nodes are `!Send`; share a [`GreenNode`] across threads and build a
//! fresh root per worker with [`SyntaxNode::new_root`].

use super::CsLanguage;

/// A node in the C# concrete syntax tree
pub type SyntaxNode = rowan::SyntaxNode<CsLanguage>;

/// A token (leaf) in the C# concrete syntax tree
pub type SyntaxToken = rowan::SyntaxToken<CsLanguage>;

/// Either a node or a token
pub type SyntaxElement = rowan::SyntaxElement<CsLanguage>;

/// Iterator over the children of a node, tokens included
pub type SyntaxElementChildren = rowan::SyntaxElementChildren<CsLanguage>;

pub use rowan::{Direction, GreenNode, GreenToken, NodeOrToken, TextRange, TextSize, WalkEvent};
