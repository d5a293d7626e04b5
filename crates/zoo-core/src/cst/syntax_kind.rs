//! Syntax kind enumeration for the C# CST
//!
//! This module defines all node and token types in the C# syntax tree.

use std::fmt;

/// Syntax kind for C# language elements
///
/// This enum represents all possible types of nodes and tokens in the CST.
/// It includes:
/// - Trivia (whitespace, line breaks, comments, directives)
/// - Keywords (reserved words only; contextual keywords lex as identifiers)
/// - Punctuation and operators
/// - Literals and identifiers
/// - Structural nodes (namespaces, type declarations, members)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum CsSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Spaces and tabs
    Whitespace = 0,
    /// Line break (`\n`, `\r\n` or `\r`)
    Newline = 1,
    /// Line comment starting with //
    CommentLine = 2,
    /// Block comment /* ... */
    CommentBlock = 3,
    /// Documentation line comment starting with ///
    DocCommentLine = 4,
    /// Documentation block comment /** ... */
    DocCommentBlock = 5,
    /// Preprocessor directive (`#region`, `#if`, ...)
    Directive = 6,

    // ==================
    // Keywords (10-99)
    // ==================

    // Declaration keywords
    UsingKw = 10,
    NamespaceKw = 11,
    ClassKw = 12,
    StructKw = 13,
    InterfaceKw = 14,
    EnumKw = 15,
    DelegateKw = 16,
    EventKw = 17,
    OperatorKw = 18,
    ImplicitKw = 19,
    ExplicitKw = 20,
    ThisKw = 21,
    ExternKw = 22,

    // Modifiers
    PublicKw = 30,
    PrivateKw = 31,
    ProtectedKw = 32,
    InternalKw = 33,
    StaticKw = 34,
    ReadonlyKw = 35,
    ConstKw = 36,
    AbstractKw = 37,
    VirtualKw = 38,
    OverrideKw = 39,
    SealedKw = 40,
    NewKw = 41,
    UnsafeKw = 42,
    VolatileKw = 43,
    FixedKw = 44,

    // Parameter modifiers
    RefKw = 50,
    OutKw = 51,
    InKw = 52,
    ParamsKw = 53,

    // ==================
    // Punctuation (100-149)
    // ==================
    Semicolon = 100,
    Comma = 101,
    Dot = 102,
    Colon = 103,
    ColonColon = 104,
    Equals = 105,
    FatArrow = 106,
    LBrace = 107,
    RBrace = 108,
    LParen = 109,
    RParen = 110,
    LBracket = 111,
    RBracket = 112,
    Lt = 113,
    Gt = 114,
    Question = 115,
    Tilde = 116,
    Star = 117,
    /// Any other operator (`+`, `==`, `&&`, `??`, ...)
    Operator = 118,

    // ==================
    // Literals & Identifiers (150-199)
    // ==================
    Ident = 150,
    StringLit = 151,
    CharLit = 152,
    NumberLit = 153,

    // ==================
    // Structure nodes (200-399)
    // ==================
    SourceFile = 200,
    ExternAliasDirective = 201,
    UsingDirective = 202,
    AttributeList = 203,
    NamespaceDeclaration = 204,
    FileScopedNamespaceDeclaration = 205,
    /// Dotted name (`Zoo.Analyzers.Rules`)
    Name = 206,

    // Type declarations
    ClassDeclaration = 220,
    StructDeclaration = 221,
    InterfaceDeclaration = 222,
    RecordDeclaration = 223,
    RecordStructDeclaration = 224,
    EnumDeclaration = 225,
    DelegateDeclaration = 226,

    // Members
    EnumMemberDeclaration = 240,
    FieldDeclaration = 241,
    EventFieldDeclaration = 242,
    EventDeclaration = 243,
    MethodDeclaration = 244,
    ConstructorDeclaration = 245,
    DestructorDeclaration = 246,
    OperatorDeclaration = 247,
    ConversionOperatorDeclaration = 248,
    PropertyDeclaration = 249,
    IndexerDeclaration = 250,

    // Accessors
    AccessorList = 260,
    GetAccessorDeclaration = 261,
    SetAccessorDeclaration = 262,
    InitAccessorDeclaration = 263,
    AddAccessorDeclaration = 264,
    RemoveAccessorDeclaration = 265,
    UnknownAccessorDeclaration = 266,

    // Member parts
    VariableDeclaration = 280,
    VariableDeclarator = 281,
    ParameterList = 282,
    BracketedParameterList = 283,
    Parameter = 284,
    TypeParameterList = 285,
    TypeParameterConstraintClause = 286,
    BaseList = 287,
    Type = 288,
    ExplicitInterfaceSpecifier = 289,
    ConstructorInitializer = 290,
    Block = 291,
    ArrowExpressionClause = 292,
    EqualsValueClause = 293,

    /// Structured trivia: consecutive `///` lines or one `/** */` block
    DocumentationComment = 300,

    // ==================
    // Special (400+)
    // ==================
    Error = 400,
    /// End of input marker; never stored in a tree
    Eof = 401,
    /// Character the lexer does not recognise
    Unknown = 402,
}

impl CsSyntaxKind {
    /// Check if this kind is trivia (whitespace, line breaks, comments, directives)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::CommentLine
                | Self::CommentBlock
                | Self::DocCommentLine
                | Self::DocCommentBlock
                | Self::Directive
        )
    }

    /// Check if this kind is a comment of any flavour
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::CommentLine | Self::CommentBlock | Self::DocCommentLine | Self::DocCommentBlock
        )
    }

    /// Check if this kind is a reserved keyword
    pub const fn is_keyword(self) -> bool {
        let raw = self as u16;
        raw >= 10 && raw < 100
    }

    /// Check if this kind is a declaration modifier
    pub const fn is_modifier(self) -> bool {
        let raw = self as u16;
        (raw >= 30 && raw < 50) || matches!(self, Self::ExternKw)
    }

    /// Check if this kind is punctuation
    pub const fn is_punct(self) -> bool {
        let raw = self as u16;
        raw >= 100 && raw < 150
    }

    /// Check if this kind is a literal or identifier
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Ident | Self::StringLit | Self::CharLit | Self::NumberLit
        )
    }

    /// Check if this kind is a node (not a token)
    pub const fn is_node(self) -> bool {
        let raw = self as u16;
        (raw >= 200 && raw < 400) || matches!(self, Self::Error)
    }

    /// Check if this kind is a type declaration (class or equivalent)
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::StructDeclaration
                | Self::InterfaceDeclaration
                | Self::RecordDeclaration
                | Self::RecordStructDeclaration
                | Self::EnumDeclaration
        )
    }

    /// Check if this kind is an accessor declaration
    pub const fn is_accessor(self) -> bool {
        matches!(
            self,
            Self::GetAccessorDeclaration
                | Self::SetAccessorDeclaration
                | Self::InitAccessorDeclaration
                | Self::AddAccessorDeclaration
                | Self::RemoveAccessorDeclaration
                | Self::UnknownAccessorDeclaration
        )
    }

    /// Get the source text for reserved keywords
    pub const fn keyword_text(self) -> Option<&'static str> {
        Some(match self {
            Self::UsingKw => "using",
            Self::NamespaceKw => "namespace",
            Self::ClassKw => "class",
            Self::StructKw => "struct",
            Self::InterfaceKw => "interface",
            Self::EnumKw => "enum",
            Self::DelegateKw => "delegate",
            Self::EventKw => "event",
            Self::OperatorKw => "operator",
            Self::ImplicitKw => "implicit",
            Self::ExplicitKw => "explicit",
            Self::ThisKw => "this",
            Self::ExternKw => "extern",
            Self::PublicKw => "public",
            Self::PrivateKw => "private",
            Self::ProtectedKw => "protected",
            Self::InternalKw => "internal",
            Self::StaticKw => "static",
            Self::ReadonlyKw => "readonly",
            Self::ConstKw => "const",
            Self::AbstractKw => "abstract",
            Self::VirtualKw => "virtual",
            Self::OverrideKw => "override",
            Self::SealedKw => "sealed",
            Self::NewKw => "new",
            Self::UnsafeKw => "unsafe",
            Self::VolatileKw => "volatile",
            Self::FixedKw => "fixed",
            Self::RefKw => "ref",
            Self::OutKw => "out",
            Self::InKw => "in",
            Self::ParamsKw => "params",
            _ => return None,
        })
    }

    /// Look up the keyword kind for a word, if it is a reserved keyword we track
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "using" => Self::UsingKw,
            "namespace" => Self::NamespaceKw,
            "class" => Self::ClassKw,
            "struct" => Self::StructKw,
            "interface" => Self::InterfaceKw,
            "enum" => Self::EnumKw,
            "delegate" => Self::DelegateKw,
            "event" => Self::EventKw,
            "operator" => Self::OperatorKw,
            "implicit" => Self::ImplicitKw,
            "explicit" => Self::ExplicitKw,
            "this" => Self::ThisKw,
            "extern" => Self::ExternKw,
            "public" => Self::PublicKw,
            "private" => Self::PrivateKw,
            "protected" => Self::ProtectedKw,
            "internal" => Self::InternalKw,
            "static" => Self::StaticKw,
            "readonly" => Self::ReadonlyKw,
            "const" => Self::ConstKw,
            "abstract" => Self::AbstractKw,
            "virtual" => Self::VirtualKw,
            "override" => Self::OverrideKw,
            "sealed" => Self::SealedKw,
            "new" => Self::NewKw,
            "unsafe" => Self::UnsafeKw,
            "volatile" => Self::VolatileKw,
            "fixed" => Self::FixedKw,
            "ref" => Self::RefKw,
            "out" => Self::OutKw,
            "in" => Self::InKw,
            "params" => Self::ParamsKw,
            _ => return None,
        })
    }
}

impl fmt::Display for CsSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<CsSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: CsSyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_classification() {
        assert!(CsSyntaxKind::Whitespace.is_trivia());
        assert!(CsSyntaxKind::Newline.is_trivia());
        assert!(CsSyntaxKind::DocCommentLine.is_trivia());
        assert!(CsSyntaxKind::Directive.is_trivia());
        assert!(!CsSyntaxKind::Ident.is_trivia());
        assert!(!CsSyntaxKind::DocumentationComment.is_trivia());
    }

    #[test]
    fn test_keyword_classification() {
        assert!(CsSyntaxKind::NamespaceKw.is_keyword());
        assert!(CsSyntaxKind::StaticKw.is_modifier());
        assert!(CsSyntaxKind::ExternKw.is_modifier());
        assert!(!CsSyntaxKind::RefKw.is_modifier());
        assert!(!CsSyntaxKind::Semicolon.is_keyword());
    }

    #[test]
    fn test_keyword_text_round_trip() {
        for word in ["namespace", "class", "readonly", "params", "this"] {
            let kind = CsSyntaxKind::from_keyword(word).expect("known keyword");
            assert_eq!(kind.keyword_text(), Some(word));
        }
        assert_eq!(CsSyntaxKind::from_keyword("record"), None);
    }

    #[test]
    fn test_node_classification() {
        assert!(CsSyntaxKind::SourceFile.is_node());
        assert!(CsSyntaxKind::FileScopedNamespaceDeclaration.is_node());
        assert!(CsSyntaxKind::Error.is_node());
        assert!(!CsSyntaxKind::Eof.is_node());
        assert!(CsSyntaxKind::RecordStructDeclaration.is_type_declaration());
        assert!(!CsSyntaxKind::DelegateDeclaration.is_type_declaration());
    }
}
