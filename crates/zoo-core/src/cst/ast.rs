//! Typed AST layer over the C# CST
//!
//! Thin wrappers that give names to the raw nodes the rules and the symbol
//! table care about. Each wrapper implements [`AstNode::cast`] to safely
//! convert from an untyped [`SyntaxNode`].
//!
//! # Example
//!
//! ```ignore
//! use zoo_core::cst::{parse_cs, ast::{AstNode, SourceFile}};
//!
//! let file = SourceFile::cast(parse_cs("namespace Zoo;\n\nclass Keeper {}").syntax()).unwrap();
//! let namespace = file.file_scoped_namespace().unwrap();
//!
//! assert_eq!(namespace.name().as_deref(), Some("Zoo"));
//! assert_eq!(namespace.first_type_member().unwrap().name().as_deref(), Some("Keeper"));
//! ```

use super::{CsSyntaxKind, SyntaxNode, SyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: CsSyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: CsSyntaxKind) -> bool {
                matches!(kind, $(CsSyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

/// Find the first child node of a specific kind
pub fn child_of_kind(parent: &SyntaxNode, kind: CsSyntaxKind) -> Option<SyntaxNode> {
    parent.children().find(|n| n.kind() == kind)
}

/// Find the first direct child token of a specific kind
pub fn token_of_kind(parent: &SyntaxNode, kind: CsSyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// Identifier text as the compiler sees it (verbatim `@` prefix removed)
pub fn identifier_text(token: &SyntaxToken) -> String {
    let text = token.text();
    text.strip_prefix('@').unwrap_or(text).to_string()
}

/// Concatenated significant tokens of a node (interior trivia dropped)
pub fn significant_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.text().to_string())
        .collect()
}

/// Identifier token that names a declaration.
///
/// This is the last identifier among the node's own tokens before its
/// parameter, type-parameter, base or body parts. Type nodes, attribute lists
/// and explicit interface prefixes are child nodes, so they are skipped.
pub fn declared_name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut name = None;
    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Node(child) => {
                if matches!(
                    child.kind(),
                    CsSyntaxKind::TypeParameterList
                        | CsSyntaxKind::ParameterList
                        | CsSyntaxKind::BracketedParameterList
                        | CsSyntaxKind::BaseList
                        | CsSyntaxKind::TypeParameterConstraintClause
                        | CsSyntaxKind::AccessorList
                        | CsSyntaxKind::Block
                        | CsSyntaxKind::ArrowExpressionClause
                        | CsSyntaxKind::EqualsValueClause
                        | CsSyntaxKind::ConstructorInitializer
                ) {
                    break;
                }
            }
            rowan::NodeOrToken::Token(token) => match token.kind() {
                CsSyntaxKind::LBrace | CsSyntaxKind::Semicolon | CsSyntaxKind::FatArrow => break,
                CsSyntaxKind::Ident => name = Some(token),
                _ => {}
            },
        }
    }
    name
}

// ============================================================================
// Source file & namespaces
// ============================================================================

ast_node!(
    /// Root of a parsed file
    SourceFile,
    SourceFile
);

impl SourceFile {
    pub fn file_scoped_namespace(&self) -> Option<FileScopedNamespace> {
        self.syntax.children().find_map(FileScopedNamespace::cast)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceDecl> {
        self.syntax.children().filter_map(NamespaceDecl::cast)
    }
}

ast_node!(
    /// Dotted namespace name
    Name,
    Name
);

impl Name {
    /// Identifier tokens, one per segment
    pub fn segments(&self) -> Vec<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == CsSyntaxKind::Ident)
            .collect()
    }

    /// Name text without surrounding or interior trivia
    pub fn text(&self) -> String {
        significant_text(&self.syntax)
    }
}

ast_node!(
    /// `namespace A.B;`
    FileScopedNamespace,
    FileScopedNamespaceDeclaration
);

impl FileScopedNamespace {
    pub fn name_node(&self) -> Option<Name> {
        self.syntax.children().find_map(Name::cast)
    }

    pub fn name(&self) -> Option<String> {
        self.name_node().map(|n| n.text())
    }

    /// The `;` terminating the namespace header
    pub fn semicolon(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.syntax, CsSyntaxKind::Semicolon)
    }

    /// Direct member declarations, in source order
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax.children().filter(|n| n.kind() != CsSyntaxKind::Name)
    }

    /// The first member that is a class, struct, interface, record or enum
    pub fn first_type_member(&self) -> Option<TypeDecl> {
        self.syntax.children().find_map(TypeDecl::cast)
    }
}

ast_node!(
    /// `namespace A.B { ... }`
    NamespaceDecl,
    NamespaceDeclaration
);

impl NamespaceDecl {
    pub fn name_node(&self) -> Option<Name> {
        self.syntax.children().find_map(Name::cast)
    }

    pub fn name(&self) -> Option<String> {
        self.name_node().map(|n| n.text())
    }
}

// ============================================================================
// Types
// ============================================================================

ast_node!(
    /// Class, struct, interface, record or enum declaration
    TypeDecl,
    ClassDeclaration
        | StructDeclaration
        | InterfaceDeclaration
        | RecordDeclaration
        | RecordStructDeclaration
        | EnumDeclaration
);

impl TypeDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        declared_name_token(&self.syntax)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|t| identifier_text(&t))
    }

    /// Primary constructor parameters (records, classes, structs)
    pub fn parameter_list(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.syntax, CsSyntaxKind::ParameterList)
    }

    pub fn is_partial(&self) -> bool {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .any(|t| t.kind() == CsSyntaxKind::Ident && t.text() == "partial")
    }
}

ast_node!(
    /// `delegate void Handler(object sender);`
    DelegateDecl,
    DelegateDeclaration
);

impl DelegateDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        declared_name_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.syntax, CsSyntaxKind::ParameterList)
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(
    /// Any member that introduces exactly one name
    NamedMember,
    MethodDeclaration | PropertyDeclaration | EventDeclaration | EnumMemberDeclaration
);

impl NamedMember {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        declared_name_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.syntax, CsSyntaxKind::ParameterList)
    }
}

ast_node!(
    /// Field or event field; declares one name per declarator
    FieldLike,
    FieldDeclaration | EventFieldDeclaration
);

impl FieldLike {
    pub fn is_event(&self) -> bool {
        self.syntax.kind() == CsSyntaxKind::EventFieldDeclaration
    }

    pub fn declarators(&self) -> Vec<SyntaxNode> {
        child_of_kind(&self.syntax, CsSyntaxKind::VariableDeclaration)
            .map(|decl| {
                decl.children()
                    .filter(|n| n.kind() == CsSyntaxKind::VariableDeclarator)
                    .collect()
            })
            .unwrap_or_default()
    }
}

ast_node!(
    /// Members with language-fixed names that still take parameters
    ParameterizedMember,
    ConstructorDeclaration
        | DestructorDeclaration
        | OperatorDeclaration
        | ConversionOperatorDeclaration
        | IndexerDeclaration
);

impl ParameterizedMember {
    pub fn parameter_list(&self) -> Option<SyntaxNode> {
        self.syntax.children().find(|n| {
            matches!(
                n.kind(),
                CsSyntaxKind::ParameterList | CsSyntaxKind::BracketedParameterList
            )
        })
    }
}

/// Parameters of a `ParameterList` or `BracketedParameterList`
pub fn parameters(list: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    list.children()
        .filter(|n| n.kind() == CsSyntaxKind::Parameter)
}
