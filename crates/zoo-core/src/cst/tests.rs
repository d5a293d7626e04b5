//! Tests for CST construction and manipulation

use super::*;
use crate::cst::ast::{AstNode, FileScopedNamespace};
use insta::assert_snapshot;
use rowan::GreenNodeBuilder;

/// Test basic CST construction and lossless property
#[test]
fn test_hand_built_namespace_cst() {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(CsSyntaxKind::SourceFile.into());
    builder.start_node(CsSyntaxKind::FileScopedNamespaceDeclaration.into());
    builder.token(CsSyntaxKind::NamespaceKw.into(), "namespace");
    builder.token(CsSyntaxKind::Whitespace.into(), " ");
    builder.start_node(CsSyntaxKind::Name.into());
    builder.token(CsSyntaxKind::Ident.into(), "Zoo");
    builder.finish_node();
    builder.token(CsSyntaxKind::Semicolon.into(), ";");
    builder.finish_node();
    builder.finish_node();

    let root = SyntaxNode::new_root(builder.finish());
    let namespace = root
        .first_child()
        .and_then(FileScopedNamespace::cast)
        .expect("namespace");

    assert_eq!(namespace.name().as_deref(), Some("Zoo"));
    assert_eq!(root.text().to_string(), "namespace Zoo;");
}

#[test]
fn test_debug_tree_snapshot() {
    let root = parse_cs("namespace Foo;\nclass Bar {}").syntax();
    assert_snapshot!(debug_tree(&root), @r#"
    SourceFile@0..27
      FileScopedNamespaceDeclaration@0..27
        NamespaceKw@0..9 "namespace"
        Whitespace@9..10 " "
        Name@10..13
          Ident@10..13 "Foo"
        Semicolon@13..14 ";"
        Newline@14..15 "\n"
        ClassDeclaration@15..27
          ClassKw@15..20 "class"
          Whitespace@20..21 " "
          Ident@21..24 "Bar"
          Whitespace@24..25 " "
          LBrace@25..26 "{"
          RBrace@26..27 "}"
    "#);
}

#[test]
fn test_debug_tree_documentation_snapshot() {
    let root = parse_cs("/// a\n/// b\nenum E { A }").syntax();
    assert_snapshot!(debug_tree(&root), @r#"
    SourceFile@0..24
      EnumDeclaration@0..24
        DocumentationComment@0..12
          DocCommentLine@0..5 "/// a"
          Newline@5..6 "\n"
          DocCommentLine@6..11 "/// b"
          Newline@11..12 "\n"
        EnumKw@12..16 "enum"
        Whitespace@16..17 " "
        Ident@17..18 "E"
        Whitespace@18..19 " "
        LBrace@19..20 "{"
        Whitespace@20..21 " "
        EnumMemberDeclaration@21..23
          Ident@21..22 "A"
          Whitespace@22..23 " "
        RBrace@23..24 "}"
    "#);
}

#[test]
fn test_round_trip_corpus() {
    let sources = [
        "",
        "\n\n",
        "namespace Foo;\r\n\r\npublic class Bar\r\n{\r\n}\r\n",
        "// header\n#nullable enable\nusing System;\n\nnamespace A.B\n{\n    /** docs */\n    internal static class C\n    {\n        private static readonly int[] Values = { 1, 2, 3 };\n        public static string Format(this string value, params object[] args) => string.Format(value, args);\n    }\n}\n",
        "namespace N;\nclass C\n{\n    void M()\n    {\n        var s = $\"{x}\";\n        if (a < b && c > d) { }\n    }\n}\n",
        "[assembly: InternalsVisibleTo(\"Tests\")]\nnamespace N;\n\n[Flags]\npublic enum Mode : byte { None = 0, Read = 1 << 0, Write = 1 << 1 }\n",
        "class Broken { void M( { int x = ; } }}} /* unterminated",
        "interface I<in T, out U> where T : class { U Get(T t); event Action<T> Seen; }",
        "unsafe struct S { fixed byte data[16]; public int* P; }",
        "namespace N; \t\u{feff}class C {}",
    ];

    for source in sources {
        let parse = parse_cs(source);
        assert_eq!(parse.syntax().text().to_string(), source, "round trip failed");
    }
}

#[test]
fn test_green_tree_is_shareable_across_threads() {
    let parse = parse_cs("namespace N;\n\nclass C {}\n");
    let green = parse.green().clone();

    let handle = std::thread::spawn(move || {
        let root = SyntaxNode::new_root(green);
        root.descendants()
            .filter(|n| n.kind() == CsSyntaxKind::ClassDeclaration)
            .count()
    });

    assert_eq!(handle.join().expect("worker"), 1);
}
