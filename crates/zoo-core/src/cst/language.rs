//! Rowan language implementation for C#
//!
//! Connects the [`CsSyntaxKind`] enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::CsSyntaxKind;

/// Language marker for C# syntax trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsLanguage;

impl Language for CsLanguage {
    type Kind = CsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Every raw value stored in a tree comes from `kind_to_raw`, so the
        // fallback arm is only reachable for foreign green nodes.
        match raw.0 {
            // Trivia
            0 => CsSyntaxKind::Whitespace,
            1 => CsSyntaxKind::Newline,
            2 => CsSyntaxKind::CommentLine,
            3 => CsSyntaxKind::CommentBlock,
            4 => CsSyntaxKind::DocCommentLine,
            5 => CsSyntaxKind::DocCommentBlock,
            6 => CsSyntaxKind::Directive,

            // Keywords (10-99)
            10 => CsSyntaxKind::UsingKw,
            11 => CsSyntaxKind::NamespaceKw,
            12 => CsSyntaxKind::ClassKw,
            13 => CsSyntaxKind::StructKw,
            14 => CsSyntaxKind::InterfaceKw,
            15 => CsSyntaxKind::EnumKw,
            16 => CsSyntaxKind::DelegateKw,
            17 => CsSyntaxKind::EventKw,
            18 => CsSyntaxKind::OperatorKw,
            19 => CsSyntaxKind::ImplicitKw,
            20 => CsSyntaxKind::ExplicitKw,
            21 => CsSyntaxKind::ThisKw,
            22 => CsSyntaxKind::ExternKw,
            30 => CsSyntaxKind::PublicKw,
            31 => CsSyntaxKind::PrivateKw,
            32 => CsSyntaxKind::ProtectedKw,
            33 => CsSyntaxKind::InternalKw,
            34 => CsSyntaxKind::StaticKw,
            35 => CsSyntaxKind::ReadonlyKw,
            36 => CsSyntaxKind::ConstKw,
            37 => CsSyntaxKind::AbstractKw,
            38 => CsSyntaxKind::VirtualKw,
            39 => CsSyntaxKind::OverrideKw,
            40 => CsSyntaxKind::SealedKw,
            41 => CsSyntaxKind::NewKw,
            42 => CsSyntaxKind::UnsafeKw,
            43 => CsSyntaxKind::VolatileKw,
            44 => CsSyntaxKind::FixedKw,
            50 => CsSyntaxKind::RefKw,
            51 => CsSyntaxKind::OutKw,
            52 => CsSyntaxKind::InKw,
            53 => CsSyntaxKind::ParamsKw,

            // Punctuation (100-149)
            100 => CsSyntaxKind::Semicolon,
            101 => CsSyntaxKind::Comma,
            102 => CsSyntaxKind::Dot,
            103 => CsSyntaxKind::Colon,
            104 => CsSyntaxKind::ColonColon,
            105 => CsSyntaxKind::Equals,
            106 => CsSyntaxKind::FatArrow,
            107 => CsSyntaxKind::LBrace,
            108 => CsSyntaxKind::RBrace,
            109 => CsSyntaxKind::LParen,
            110 => CsSyntaxKind::RParen,
            111 => CsSyntaxKind::LBracket,
            112 => CsSyntaxKind::RBracket,
            113 => CsSyntaxKind::Lt,
            114 => CsSyntaxKind::Gt,
            115 => CsSyntaxKind::Question,
            116 => CsSyntaxKind::Tilde,
            117 => CsSyntaxKind::Star,
            118 => CsSyntaxKind::Operator,

            // Literals & Identifiers (150-199)
            150 => CsSyntaxKind::Ident,
            151 => CsSyntaxKind::StringLit,
            152 => CsSyntaxKind::CharLit,
            153 => CsSyntaxKind::NumberLit,

            // Structure nodes (200-399)
            200 => CsSyntaxKind::SourceFile,
            201 => CsSyntaxKind::ExternAliasDirective,
            202 => CsSyntaxKind::UsingDirective,
            203 => CsSyntaxKind::AttributeList,
            204 => CsSyntaxKind::NamespaceDeclaration,
            205 => CsSyntaxKind::FileScopedNamespaceDeclaration,
            206 => CsSyntaxKind::Name,
            220 => CsSyntaxKind::ClassDeclaration,
            221 => CsSyntaxKind::StructDeclaration,
            222 => CsSyntaxKind::InterfaceDeclaration,
            223 => CsSyntaxKind::RecordDeclaration,
            224 => CsSyntaxKind::RecordStructDeclaration,
            225 => CsSyntaxKind::EnumDeclaration,
            226 => CsSyntaxKind::DelegateDeclaration,
            240 => CsSyntaxKind::EnumMemberDeclaration,
            241 => CsSyntaxKind::FieldDeclaration,
            242 => CsSyntaxKind::EventFieldDeclaration,
            243 => CsSyntaxKind::EventDeclaration,
            244 => CsSyntaxKind::MethodDeclaration,
            245 => CsSyntaxKind::ConstructorDeclaration,
            246 => CsSyntaxKind::DestructorDeclaration,
            247 => CsSyntaxKind::OperatorDeclaration,
            248 => CsSyntaxKind::ConversionOperatorDeclaration,
            249 => CsSyntaxKind::PropertyDeclaration,
            250 => CsSyntaxKind::IndexerDeclaration,
            260 => CsSyntaxKind::AccessorList,
            261 => CsSyntaxKind::GetAccessorDeclaration,
            262 => CsSyntaxKind::SetAccessorDeclaration,
            263 => CsSyntaxKind::InitAccessorDeclaration,
            264 => CsSyntaxKind::AddAccessorDeclaration,
            265 => CsSyntaxKind::RemoveAccessorDeclaration,
            266 => CsSyntaxKind::UnknownAccessorDeclaration,
            280 => CsSyntaxKind::VariableDeclaration,
            281 => CsSyntaxKind::VariableDeclarator,
            282 => CsSyntaxKind::ParameterList,
            283 => CsSyntaxKind::BracketedParameterList,
            284 => CsSyntaxKind::Parameter,
            285 => CsSyntaxKind::TypeParameterList,
            286 => CsSyntaxKind::TypeParameterConstraintClause,
            287 => CsSyntaxKind::BaseList,
            288 => CsSyntaxKind::Type,
            289 => CsSyntaxKind::ExplicitInterfaceSpecifier,
            290 => CsSyntaxKind::ConstructorInitializer,
            291 => CsSyntaxKind::Block,
            292 => CsSyntaxKind::ArrowExpressionClause,
            293 => CsSyntaxKind::EqualsValueClause,
            300 => CsSyntaxKind::DocumentationComment,

            // Special (400+)
            400 => CsSyntaxKind::Error,
            401 => CsSyntaxKind::Eof,
            402 => CsSyntaxKind::Unknown,

            _ => CsSyntaxKind::Unknown,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kinds = [
            CsSyntaxKind::Whitespace,
            CsSyntaxKind::Newline,
            CsSyntaxKind::NamespaceKw,
            CsSyntaxKind::Semicolon,
            CsSyntaxKind::Ident,
            CsSyntaxKind::FileScopedNamespaceDeclaration,
            CsSyntaxKind::DocumentationComment,
            CsSyntaxKind::Error,
        ];

        for &kind in &kinds {
            let raw = CsLanguage::kind_to_raw(kind);
            let back = CsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "Roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::Whitespace).0, 0);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::UsingKw).0, 10);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::Semicolon).0, 100);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::SourceFile).0, 200);
    }

    #[test]
    fn test_unmapped_raw_value() {
        assert_eq!(
            CsLanguage::kind_from_raw(rowan::SyntaxKind(999)),
            CsSyntaxKind::Unknown
        );
    }
}
