//! Per-file symbol table over the C# CST
//!
//! Symbols are resolved purely from declarations: there is no binding, no
//! type information and no cross-file merging. Partial types and repeated
//! namespace declarations within one file merge into a single symbol with
//! several locations.

use crate::cst::ast::{
    AstNode, DelegateDecl, FieldLike, NamedMember, ParameterizedMember, TypeDecl,
    child_of_kind, declared_name_token, identifier_text, parameters,
};
use crate::cst::{CsSyntaxKind, SyntaxNode, SyntaxToken, TextRange};
use std::collections::HashMap;
use std::fmt;

/// Kinds of symbols the table resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    NamedType,
    Method,
    Property,
    Field,
    Event,
    Parameter,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::NamedType => "type",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Field => "field",
            SymbolKind::Event => "event",
            SymbolKind::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// A named, kinded entity declared in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Simple name, verbatim `@` removed
    pub name: String,
    pub kind: SymbolKind,
    /// Qualified name of the enclosing namespace, type or member
    pub container: Option<String>,
    /// Ranges of the declaring identifier tokens; the first is primary
    pub locations: Vec<TextRange>,
}

impl Symbol {
    pub fn primary_location(&self) -> Option<TextRange> {
        self.locations.first().copied()
    }

    pub fn qualified_name(&self) -> String {
        qualify(self.container.as_deref(), &self.name)
    }
}

/// Symbols of one file, in declaration order
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    /// Merge keys of namespaces and named types
    merged: HashMap<(SymbolKind, String), usize>,
}

impl SymbolTable {
    /// Resolve every symbol declared under `root`
    pub fn build(root: &SyntaxNode) -> Self {
        let mut table = Self::default();
        table.visit_children(root, None);
        tracing::trace!("Resolved {} symbols", table.symbols.len());
        table
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |s| s.kind == kind)
    }

    /// First symbol with the given simple name
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    fn push(&mut self, kind: SymbolKind, token: &SyntaxToken, container: Option<&str>) {
        self.symbols.push(Symbol {
            name: identifier_text(token),
            kind,
            container: container.map(str::to_string),
            locations: vec![token.text_range()],
        });
    }

    /// Add a symbol or, if `key` was seen before, append the location to it
    fn push_merged(
        &mut self,
        kind: SymbolKind,
        key: String,
        token: &SyntaxToken,
        container: Option<&str>,
    ) {
        if let Some(&idx) = self.merged.get(&(kind, key.clone())) {
            self.symbols[idx].locations.push(token.text_range());
            return;
        }
        self.merged.insert((kind, key), self.symbols.len());
        self.push(kind, token, container);
    }

    fn visit_children(&mut self, node: &SyntaxNode, container: Option<&str>) {
        for child in node.children() {
            self.visit(&child, container);
        }
    }

    fn visit(&mut self, node: &SyntaxNode, container: Option<&str>) {
        match node.kind() {
            CsSyntaxKind::NamespaceDeclaration | CsSyntaxKind::FileScopedNamespaceDeclaration => {
                self.visit_namespace(node, container);
            }
            kind if TypeDecl::can_cast(kind) => {
                if let Some(decl) = TypeDecl::cast(node.clone()) {
                    self.visit_type(&decl, container);
                }
            }
            CsSyntaxKind::DelegateDeclaration => {
                let Some(decl) = DelegateDecl::cast(node.clone()) else {
                    return;
                };
                let Some(token) = decl.name_token() else {
                    return;
                };
                let key = type_key(container, &token, node);
                self.push_merged(SymbolKind::NamedType, key, &token, container);
                let qualified = qualify(container, &identifier_text(&token));
                self.visit_parameters(decl.parameter_list(), &qualified);
            }
            CsSyntaxKind::FieldDeclaration | CsSyntaxKind::EventFieldDeclaration => {
                let Some(field) = FieldLike::cast(node.clone()) else {
                    return;
                };
                let kind = if field.is_event() {
                    SymbolKind::Event
                } else {
                    SymbolKind::Field
                };
                for declarator in field.declarators() {
                    if let Some(token) = declared_name_token(&declarator) {
                        self.push(kind, &token, container);
                    }
                }
            }
            CsSyntaxKind::MethodDeclaration
            | CsSyntaxKind::PropertyDeclaration
            | CsSyntaxKind::EventDeclaration
            | CsSyntaxKind::EnumMemberDeclaration => {
                let Some(member) = NamedMember::cast(node.clone()) else {
                    return;
                };
                let Some(token) = member.name_token() else {
                    return;
                };
                let kind = match node.kind() {
                    CsSyntaxKind::MethodDeclaration => SymbolKind::Method,
                    CsSyntaxKind::PropertyDeclaration => SymbolKind::Property,
                    CsSyntaxKind::EventDeclaration => SymbolKind::Event,
                    _ => SymbolKind::Field,
                };
                self.push(kind, &token, container);
                if kind == SymbolKind::Method {
                    let qualified = qualify(container, &identifier_text(&token));
                    self.visit_parameters(member.parameter_list(), &qualified);
                }
            }
            kind if ParameterizedMember::can_cast(kind) => {
                if let (Some(member), Some(owner)) =
                    (ParameterizedMember::cast(node.clone()), container)
                {
                    self.visit_parameters(member.parameter_list(), owner);
                }
            }
            CsSyntaxKind::Error => self.visit_children(node, container),
            _ => {}
        }
    }

    fn visit_namespace(&mut self, node: &SyntaxNode, container: Option<&str>) {
        let Some(name) = child_of_kind(node, CsSyntaxKind::Name) else {
            self.visit_children(node, container);
            return;
        };

        let mut path = container.map(str::to_string);
        for segment in name
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == CsSyntaxKind::Ident)
        {
            let qualified = qualify(path.as_deref(), &identifier_text(&segment));
            self.push_merged(
                SymbolKind::Namespace,
                qualified.clone(),
                &segment,
                path.as_deref(),
            );
            path = Some(qualified);
        }

        self.visit_children(node, path.as_deref());
    }

    fn visit_type(&mut self, decl: &TypeDecl, container: Option<&str>) {
        let Some(token) = decl.name_token() else {
            self.visit_children(decl.syntax(), container);
            return;
        };
        let key = type_key(container, &token, decl.syntax());
        self.push_merged(SymbolKind::NamedType, key, &token, container);

        let qualified = qualify(container, &identifier_text(&token));
        self.visit_parameters(decl.parameter_list(), &qualified);
        self.visit_children(decl.syntax(), Some(&qualified));
    }

    fn visit_parameters(&mut self, list: Option<SyntaxNode>, owner: &str) {
        let Some(list) = list else {
            return;
        };
        for parameter in parameters(&list) {
            if let Some(token) = declared_name_token(&parameter) {
                self.push(SymbolKind::Parameter, &token, Some(owner));
            }
        }
    }
}

fn qualify(container: Option<&str>, name: &str) -> String {
    match container {
        Some(container) => format!("{container}.{name}"),
        None => name.to_string(),
    }
}

/// `Outer.Name`N, where N is the number of type parameters
fn type_key(container: Option<&str>, token: &SyntaxToken, decl: &SyntaxNode) -> String {
    let arity = child_of_kind(decl, CsSyntaxKind::TypeParameterList)
        .map(|list| {
            list.children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == CsSyntaxKind::Ident)
                .count()
        })
        .unwrap_or(0);
    format!("{}`{arity}", qualify(container, &identifier_text(token)))
}
