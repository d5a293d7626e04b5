//! Declaration-level parser for C# source
//!
//! Builds a lossless green tree from the token stream produced by
//! [`lex_with_trivia`]. The grammar stops at the member level: method bodies,
//! accessor bodies and initializer expressions are kept as opaque token groups
//! (`Block`, `ArrowExpressionClause`, `EqualsValueClause`).
//!
//! Trivia is attached to tokens before parsing starts:
//! - a token's *trailing* trivia is whatever follows it on the same line, up to
//!   and including the first line break;
//! - everything else is *leading* trivia of the next significant token, and is
//!   emitted inside the innermost node that starts with that token;
//! - `///` lines and `/** */` blocks in leading position are grouped into a
//!   `DocumentationComment` node.
//!
//! The parser never fails. Unexpected input is wrapped in `Error` nodes and
//! every loop consumes at least one token per iteration.

use super::lexer::{CstSpan, LexerError};
use super::{CstBuilder, CstToken, CsSyntaxKind, GreenNode, SyntaxNode, lex_with_trivia};

/// A structural problem found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: CstSpan,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Result of parsing one source file
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    lexer_errors: Vec<LexerError>,
    errors: Vec<ParseError>,
}

impl Parse {
    /// Build a red tree rooted at the parsed `SourceFile`
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn into_green(self) -> GreenNode {
        self.green
    }

    pub fn lexer_errors(&self) -> &[LexerError] {
        &self.lexer_errors
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.lexer_errors.is_empty() || !self.errors.is_empty()
    }
}

/// Parse C# source into a lossless CST
///
/// # Example
///
/// ```rust,ignore
/// use zoo_core::cst::parse_cs;
///
/// let source = "namespace Zoo;\n\npublic class Keeper {}\n";
/// let parse = parse_cs(source);
/// assert_eq!(parse.syntax().text().to_string(), source);
/// ```
pub fn parse_cs(source: &str) -> Parse {
    let (tokens, lexer_errors) = lex_with_trivia(source);
    let (significant, eof_trivia) = attach_trivia(tokens);

    let mut parser = Parser::new(significant, source.len());
    parser.parse_source_file(&eof_trivia);

    Parse {
        green: parser.builder.finish(),
        lexer_errors,
        errors: parser.errors,
    }
}

/// One leading trivia element before grouping into the tree
#[derive(Debug, Clone)]
enum TriviaGroup {
    Token(CstToken),
    Documentation(Vec<CstToken>),
}

/// A significant token together with the trivia attributed to it
#[derive(Debug, Clone)]
struct SigToken {
    token: CstToken,
    leading: Vec<TriviaGroup>,
    trailing: Vec<CstToken>,
}

/// Split the flat token stream into significant tokens with attached trivia.
/// Returns the tokens and the trivia that follows the last of them.
fn attach_trivia(tokens: Vec<CstToken>) -> (Vec<SigToken>, Vec<TriviaGroup>) {
    let mut significant = Vec::new();
    let mut pending = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        if token.kind.is_trivia() {
            pending.push(token);
            continue;
        }

        let leading = group_leading(std::mem::take(&mut pending));
        let mut trailing = Vec::new();
        while let Some(next) = iter.next_if(|t| t.kind.is_trivia()) {
            let ends_line = next.kind == CsSyntaxKind::Newline;
            trailing.push(demote_doc_comment(next));
            if ends_line {
                break;
            }
        }

        significant.push(SigToken {
            token,
            leading,
            trailing,
        });
    }

    (significant, group_leading(pending))
}

/// Documentation markers only count in leading position
fn demote_doc_comment(mut token: CstToken) -> CstToken {
    token.kind = match token.kind {
        CsSyntaxKind::DocCommentLine => CsSyntaxKind::CommentLine,
        CsSyntaxKind::DocCommentBlock => CsSyntaxKind::CommentBlock,
        other => other,
    };
    token
}

/// Group runs of `///` lines (with their line breaks and interior indentation)
/// and single `/** */` blocks into documentation groups
fn group_leading(trivia: Vec<CstToken>) -> Vec<TriviaGroup> {
    let mut groups = Vec::new();
    let mut i = 0;

    while i < trivia.len() {
        match trivia[i].kind {
            CsSyntaxKind::DocCommentLine => {
                let start = i;
                i += 1;
                while trivia.get(i).is_some_and(|t| t.kind == CsSyntaxKind::Newline) {
                    i += 1;
                    let indent = usize::from(
                        trivia
                            .get(i)
                            .is_some_and(|t| t.kind == CsSyntaxKind::Whitespace),
                    );
                    if trivia
                        .get(i + indent)
                        .is_some_and(|t| t.kind == CsSyntaxKind::DocCommentLine)
                    {
                        i += indent + 1;
                    } else {
                        break;
                    }
                }
                groups.push(TriviaGroup::Documentation(trivia[start..i].to_vec()));
            }
            CsSyntaxKind::DocCommentBlock => {
                groups.push(TriviaGroup::Documentation(vec![trivia[i].clone()]));
                i += 1;
            }
            _ => {
                groups.push(TriviaGroup::Token(trivia[i].clone()));
                i += 1;
            }
        }
    }

    groups
}

fn emit_leading(builder: &mut CstBuilder, groups: &[TriviaGroup]) {
    for group in groups {
        match group {
            TriviaGroup::Token(token) => builder.add_token(token),
            TriviaGroup::Documentation(tokens) => {
                builder.start_node(CsSyntaxKind::DocumentationComment);
                for token in tokens {
                    builder.add_token(token);
                }
                builder.finish_node();
            }
        }
    }
}

/// Contextual words that act as modifiers when another declaration word follows
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file"];

/// Token stream parser
struct Parser {
    tokens: Vec<SigToken>,
    pos: usize,
    builder: CstBuilder,
    errors: Vec<ParseError>,
    source_len: usize,
}

impl Parser {
    fn new(tokens: Vec<SigToken>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
            source_len,
        }
    }

    // ==================
    // Token access
    // ==================

    fn kind_at(&self, idx: usize) -> CsSyntaxKind {
        self.tokens
            .get(idx)
            .map_or(CsSyntaxKind::Eof, |t| t.token.kind)
    }

    fn text_at(&self, idx: usize) -> &str {
        self.tokens.get(idx).map_or("", |t| t.token.text.as_str())
    }

    fn current(&self) -> CsSyntaxKind {
        self.kind_at(self.pos)
    }

    fn nth(&self, n: usize) -> CsSyntaxKind {
        self.kind_at(self.pos + n)
    }

    fn at(&self, kind: CsSyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn is_contextual_at(&self, idx: usize, word: &str) -> bool {
        self.kind_at(idx) == CsSyntaxKind::Ident && self.text_at(idx) == word
    }

    fn at_contextual(&self, word: &str) -> bool {
        self.is_contextual_at(self.pos, word)
    }

    /// Emit the current token with its trivia and advance
    fn bump(&mut self) {
        let Some(sig) = self.tokens.get(self.pos) else {
            return;
        };
        emit_leading(&mut self.builder, &sig.leading);
        self.builder.add_token(&sig.token);
        for trivia in &sig.trailing {
            self.builder.add_token(trivia);
        }
        self.pos += 1;
    }

    fn expect(&mut self, kind: CsSyntaxKind, what: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let span = self.tokens.get(self.pos).map_or(
            self.source_len..self.source_len,
            |t| t.token.span.clone(),
        );
        self.errors.push(ParseError::new(message, span));
    }

    // ==================
    // Lookahead
    // ==================

    /// Index just past the bracket that closes the one at `idx`
    fn balanced_end(&self, mut idx: usize, open: CsSyntaxKind, close: CsSyntaxKind) -> usize {
        let mut depth = 0usize;
        while idx < self.tokens.len() {
            let kind = self.kind_at(idx);
            idx += 1;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
        }
        idx
    }

    /// Index just past a generic argument list starting at `idx` (`<`), if the
    /// tokens there look like one
    fn type_args_end(&self, mut idx: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.kind_at(idx) {
                CsSyntaxKind::Lt => depth += 1,
                CsSyntaxKind::Gt => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(idx + 1);
                    }
                }
                CsSyntaxKind::Ident
                | CsSyntaxKind::Comma
                | CsSyntaxKind::Dot
                | CsSyntaxKind::ColonColon
                | CsSyntaxKind::Question
                | CsSyntaxKind::Star
                | CsSyntaxKind::LBracket
                | CsSyntaxKind::RBracket
                | CsSyntaxKind::LParen
                | CsSyntaxKind::RParen
                | CsSyntaxKind::InKw
                | CsSyntaxKind::OutKw => {}
                _ => return None,
            }
            idx += 1;
        }
    }

    /// Index just past a (possibly qualified, possibly generic) name at `idx`
    fn qualified_name_end(&self, mut idx: usize) -> Option<usize> {
        loop {
            if self.kind_at(idx) != CsSyntaxKind::Ident {
                return None;
            }
            idx += 1;
            if self.kind_at(idx) == CsSyntaxKind::Lt {
                idx = self.type_args_end(idx)?;
            }
            if matches!(
                self.kind_at(idx),
                CsSyntaxKind::Dot | CsSyntaxKind::ColonColon
            ) && self.kind_at(idx + 1) == CsSyntaxKind::Ident
            {
                idx += 1;
                continue;
            }
            return Some(idx);
        }
    }

    /// Index just past a type starting at `idx`
    fn type_end(&self, mut idx: usize) -> Option<usize> {
        if self.kind_at(idx) == CsSyntaxKind::RefKw {
            idx += 1;
            if self.kind_at(idx) == CsSyntaxKind::ReadonlyKw {
                idx += 1;
            }
        }

        idx = match self.kind_at(idx) {
            CsSyntaxKind::LParen => {
                self.balanced_end(idx, CsSyntaxKind::LParen, CsSyntaxKind::RParen)
            }
            CsSyntaxKind::Ident => self.qualified_name_end(idx)?,
            _ => return None,
        };

        loop {
            match self.kind_at(idx) {
                CsSyntaxKind::Question | CsSyntaxKind::Star => idx += 1,
                CsSyntaxKind::LBracket
                    if matches!(
                        self.kind_at(idx + 1),
                        CsSyntaxKind::RBracket | CsSyntaxKind::Comma
                    ) =>
                {
                    idx = self.balanced_end(idx, CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
                }
                _ => break,
            }
        }

        Some(idx)
    }

    /// Locate the member name at `idx`, skipping an explicit interface prefix
    /// (`IFoo<T>.Bar`). Returns the name index and the index after the name.
    fn member_name_end(&self, mut idx: usize) -> Option<(usize, usize)> {
        loop {
            if self.kind_at(idx) != CsSyntaxKind::Ident {
                return None;
            }
            let name = idx;
            let after = idx + 1;

            let mut next = after;
            if self.kind_at(after) == CsSyntaxKind::Lt {
                let Some(end) = self.type_args_end(after) else {
                    return Some((name, after));
                };
                next = end;
            }

            if matches!(
                self.kind_at(next),
                CsSyntaxKind::Dot | CsSyntaxKind::ColonColon
            ) {
                match self.kind_at(next + 1) {
                    CsSyntaxKind::Ident => {
                        idx = next + 1;
                        continue;
                    }
                    CsSyntaxKind::ThisKw => return Some((name, next)),
                    _ => {}
                }
            }
            return Some((name, after));
        }
    }

    fn skip_attributes(&self, mut idx: usize) -> usize {
        while self.kind_at(idx) == CsSyntaxKind::LBracket {
            idx = self.balanced_end(idx, CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
        }
        idx
    }

    fn is_modifier_at(&self, idx: usize) -> bool {
        let kind = self.kind_at(idx);
        if kind.is_modifier() {
            return true;
        }
        let next = self.kind_at(idx + 1);
        match kind {
            // `ref struct`, `ref partial struct`
            CsSyntaxKind::RefKw => {
                next == CsSyntaxKind::StructKw || self.is_contextual_at(idx + 1, "partial")
            }
            CsSyntaxKind::Ident => {
                CONTEXTUAL_MODIFIERS.contains(&self.text_at(idx))
                    && (next == CsSyntaxKind::Ident || next.is_keyword())
            }
            _ => false,
        }
    }

    fn skip_modifiers(&self, mut idx: usize) -> usize {
        while self.is_modifier_at(idx) {
            idx += 1;
        }
        idx
    }

    fn is_record_keyword_at(&self, idx: usize) -> bool {
        self.is_contextual_at(idx, "record")
            && matches!(
                self.kind_at(idx + 1),
                CsSyntaxKind::Ident | CsSyntaxKind::ClassKw | CsSyntaxKind::StructKw
            )
    }

    /// Decide which member declaration starts at the current position
    fn classify_member(&self, in_type: bool) -> Option<CsSyntaxKind> {
        let idx = self.skip_modifiers(self.skip_attributes(self.pos));

        let kind = match self.kind_at(idx) {
            CsSyntaxKind::ClassKw => CsSyntaxKind::ClassDeclaration,
            CsSyntaxKind::StructKw => CsSyntaxKind::StructDeclaration,
            CsSyntaxKind::InterfaceKw => CsSyntaxKind::InterfaceDeclaration,
            CsSyntaxKind::EnumKw => CsSyntaxKind::EnumDeclaration,
            CsSyntaxKind::DelegateKw => CsSyntaxKind::DelegateDeclaration,
            CsSyntaxKind::Ident if self.is_record_keyword_at(idx) => {
                if self.kind_at(idx + 1) == CsSyntaxKind::StructKw {
                    CsSyntaxKind::RecordStructDeclaration
                } else {
                    CsSyntaxKind::RecordDeclaration
                }
            }
            CsSyntaxKind::EventKw => {
                let type_end = self.type_end(idx + 1)?;
                let (_, after_name) = self.member_name_end(type_end)?;
                if self.kind_at(after_name) == CsSyntaxKind::LBrace {
                    CsSyntaxKind::EventDeclaration
                } else {
                    CsSyntaxKind::EventFieldDeclaration
                }
            }
            CsSyntaxKind::Tilde => CsSyntaxKind::DestructorDeclaration,
            CsSyntaxKind::ImplicitKw | CsSyntaxKind::ExplicitKw => {
                CsSyntaxKind::ConversionOperatorDeclaration
            }
            CsSyntaxKind::Ident if in_type && self.kind_at(idx + 1) == CsSyntaxKind::LParen => {
                CsSyntaxKind::ConstructorDeclaration
            }
            _ => {
                let type_end = self.type_end(idx)?;
                match self.kind_at(type_end) {
                    CsSyntaxKind::OperatorKw => CsSyntaxKind::OperatorDeclaration,
                    CsSyntaxKind::ThisKw => CsSyntaxKind::IndexerDeclaration,
                    CsSyntaxKind::Ident => {
                        let (_, after_name) = self.member_name_end(type_end)?;
                        match self.kind_at(after_name) {
                            CsSyntaxKind::Dot if self.kind_at(after_name + 1) == CsSyntaxKind::ThisKw => {
                                CsSyntaxKind::IndexerDeclaration
                            }
                            CsSyntaxKind::LParen | CsSyntaxKind::Lt => {
                                CsSyntaxKind::MethodDeclaration
                            }
                            CsSyntaxKind::LBrace | CsSyntaxKind::FatArrow => {
                                CsSyntaxKind::PropertyDeclaration
                            }
                            _ => CsSyntaxKind::FieldDeclaration,
                        }
                    }
                    _ => return None,
                }
            }
        };

        Some(kind)
    }

    // ==================
    // Recovery
    // ==================

    /// Wrap one token in an `Error` node
    fn error_token(&mut self, message: &str) {
        self.error(message);
        self.builder.start_node(CsSyntaxKind::Error);
        self.bump();
        self.builder.finish_node();
    }

    /// Wrap tokens up to the end of the current statement-like run in an
    /// `Error` node. Consumes at least one token.
    fn recover(&mut self, message: &str) {
        self.error(message);
        self.builder.start_node(CsSyntaxKind::Error);

        let first = self.current();
        self.bump();
        let mut depth = match first {
            CsSyntaxKind::LBrace => 1usize,
            CsSyntaxKind::Semicolon | CsSyntaxKind::RBrace => {
                self.builder.finish_node();
                return;
            }
            _ => 0,
        };

        while !self.at_end() {
            match self.current() {
                CsSyntaxKind::RBrace if depth == 0 => break,
                CsSyntaxKind::RBrace => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                }
                CsSyntaxKind::LBrace => {
                    depth += 1;
                    self.bump();
                }
                CsSyntaxKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                }
                _ => self.bump(),
            }
        }

        self.builder.finish_node();
    }

    /// Wrap tokens in an `Error` node until one of `stops` at bracket depth
    /// zero. Consumes nothing when already at a stop.
    fn skip_error_until(&mut self, stops: &[CsSyntaxKind]) {
        if self.at_end() || stops.contains(&self.current()) {
            return;
        }
        self.error("unexpected tokens");
        self.builder.start_node(CsSyntaxKind::Error);
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            if depth == 0 && (stops.contains(&kind) || kind == CsSyntaxKind::RBrace) {
                break;
            }
            match kind {
                CsSyntaxKind::LParen | CsSyntaxKind::LBracket | CsSyntaxKind::LBrace => depth += 1,
                CsSyntaxKind::RParen | CsSyntaxKind::RBracket | CsSyntaxKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
        }
        self.builder.finish_node();
    }

    // ==================
    // Opaque groups
    // ==================

    /// Bump a bracketed group, nested brackets included
    fn bump_balanced(&mut self, open: CsSyntaxKind, close: CsSyntaxKind) {
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Bump an expression up to a terminator at bracket depth zero. Closing
    /// brackets and `;` at depth zero always terminate.
    fn skip_expression(&mut self, terminators: &[CsSyntaxKind]) {
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            if depth == 0
                && (terminators.contains(&kind)
                    || matches!(
                        kind,
                        CsSyntaxKind::RParen
                            | CsSyntaxKind::RBracket
                            | CsSyntaxKind::RBrace
                            | CsSyntaxKind::Semicolon
                    ))
            {
                break;
            }
            match kind {
                CsSyntaxKind::LParen | CsSyntaxKind::LBracket | CsSyntaxKind::LBrace => depth += 1,
                CsSyntaxKind::RParen | CsSyntaxKind::RBracket | CsSyntaxKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                CsSyntaxKind::Lt => {
                    // `new Dictionary<int, string>()` must not split on the comma
                    if let Some(end) = self.type_args_end(self.pos) {
                        while self.pos < end {
                            self.bump();
                        }
                        continue;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_block(&mut self) {
        self.builder.start_node(CsSyntaxKind::Block);
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            self.bump();
            match kind {
                CsSyntaxKind::LBrace => depth += 1,
                CsSyntaxKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        if depth > 0 {
            self.error("unterminated block");
        }
        self.builder.finish_node();
    }

    fn parse_arrow_expression(&mut self) {
        self.builder.start_node(CsSyntaxKind::ArrowExpressionClause);
        self.bump();
        self.skip_expression(&[CsSyntaxKind::Semicolon]);
        self.builder.finish_node();
        self.expect(CsSyntaxKind::Semicolon, "';'");
    }

    fn parse_equals_value(&mut self, terminators: &[CsSyntaxKind]) {
        self.builder.start_node(CsSyntaxKind::EqualsValueClause);
        self.bump();
        self.skip_expression(terminators);
        self.builder.finish_node();
    }

    /// Method-like body: block, expression body, or `;`
    fn parse_body(&mut self) {
        match self.current() {
            CsSyntaxKind::LBrace => self.parse_block(),
            CsSyntaxKind::FatArrow => self.parse_arrow_expression(),
            CsSyntaxKind::Semicolon => self.bump(),
            _ => self.error("expected body or ';'"),
        }
    }

    // ==================
    // Compilation unit & namespaces
    // ==================

    fn parse_source_file(&mut self, eof_trivia: &[TriviaGroup]) {
        self.builder.start_node(CsSyntaxKind::SourceFile);
        self.parse_namespace_members(false);
        emit_leading(&mut self.builder, eof_trivia);
        self.builder.finish_node();
    }

    fn parse_namespace_members(&mut self, braced: bool) {
        while !self.at_end() {
            if braced && self.at(CsSyntaxKind::RBrace) {
                break;
            }
            let before = self.pos;
            self.parse_namespace_member();
            if self.pos == before {
                self.error_token("unexpected token");
            }
        }
    }

    fn parse_namespace_member(&mut self) {
        match self.current() {
            CsSyntaxKind::UsingKw => self.parse_using_directive(),
            CsSyntaxKind::Ident
                if self.at_contextual("global") && self.nth(1) == CsSyntaxKind::UsingKw =>
            {
                self.parse_using_directive();
            }
            CsSyntaxKind::ExternKw if self.is_contextual_at(self.pos + 1, "alias") => {
                self.parse_extern_alias();
            }
            CsSyntaxKind::NamespaceKw => self.parse_namespace(),
            CsSyntaxKind::LBracket if self.at_global_attribute() => self.parse_attribute_list(),
            _ => self.parse_member(false),
        }
    }

    fn at_global_attribute(&self) -> bool {
        self.nth(1) == CsSyntaxKind::Ident
            && matches!(self.text_at(self.pos + 1), "assembly" | "module")
            && self.nth(2) == CsSyntaxKind::Colon
    }

    fn parse_using_directive(&mut self) {
        self.builder.start_node(CsSyntaxKind::UsingDirective);
        if self.at_contextual("global") {
            self.bump();
        }
        self.bump();
        while !self.at_end()
            && !matches!(
                self.current(),
                CsSyntaxKind::Semicolon | CsSyntaxKind::LBrace | CsSyntaxKind::RBrace
            )
        {
            self.bump();
        }
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_extern_alias(&mut self) {
        self.builder.start_node(CsSyntaxKind::ExternAliasDirective);
        self.bump();
        self.bump();
        self.expect(CsSyntaxKind::Ident, "alias name");
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_namespace(&mut self) {
        let mut idx = self.pos + 1;
        while matches!(
            self.kind_at(idx),
            CsSyntaxKind::Ident | CsSyntaxKind::Dot | CsSyntaxKind::ColonColon
        ) {
            idx += 1;
        }
        let file_scoped = self.kind_at(idx) == CsSyntaxKind::Semicolon;

        if file_scoped {
            self.builder
                .start_node(CsSyntaxKind::FileScopedNamespaceDeclaration);
            self.bump();
            self.parse_name();
            self.bump();
            self.parse_namespace_members(false);
        } else {
            self.builder.start_node(CsSyntaxKind::NamespaceDeclaration);
            self.bump();
            self.parse_name();
            if self.expect(CsSyntaxKind::LBrace, "'{'") {
                self.parse_namespace_members(true);
                self.expect(CsSyntaxKind::RBrace, "'}'");
                if self.at(CsSyntaxKind::Semicolon) {
                    self.bump();
                }
            }
        }

        self.builder.finish_node();
    }

    fn parse_name(&mut self) {
        if !self.at(CsSyntaxKind::Ident) {
            self.error("expected name");
            return;
        }
        self.builder.start_node(CsSyntaxKind::Name);
        self.bump();
        while matches!(
            self.current(),
            CsSyntaxKind::Dot | CsSyntaxKind::ColonColon
        ) && self.nth(1) == CsSyntaxKind::Ident
        {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    // ==================
    // Declarations
    // ==================

    fn parse_attribute_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::AttributeList);
        self.bump_balanced(CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
        self.builder.finish_node();
    }

    fn parse_attributes_and_modifiers(&mut self) {
        while self.at(CsSyntaxKind::LBracket) {
            self.parse_attribute_list();
        }
        while self.is_modifier_at(self.pos) {
            self.bump();
        }
    }

    fn parse_member(&mut self, in_type: bool) {
        let Some(kind) = self.classify_member(in_type) else {
            self.recover("expected declaration");
            return;
        };

        match kind {
            CsSyntaxKind::ClassDeclaration
            | CsSyntaxKind::StructDeclaration
            | CsSyntaxKind::InterfaceDeclaration
            | CsSyntaxKind::RecordDeclaration
            | CsSyntaxKind::RecordStructDeclaration => self.parse_type_declaration(kind),
            CsSyntaxKind::EnumDeclaration => self.parse_enum(),
            CsSyntaxKind::DelegateDeclaration => self.parse_delegate(),
            CsSyntaxKind::EventFieldDeclaration => self.parse_event_field(),
            CsSyntaxKind::EventDeclaration => self.parse_event(),
            CsSyntaxKind::MethodDeclaration => self.parse_method(),
            CsSyntaxKind::ConstructorDeclaration => self.parse_constructor(),
            CsSyntaxKind::DestructorDeclaration => self.parse_destructor(),
            CsSyntaxKind::OperatorDeclaration => self.parse_operator(),
            CsSyntaxKind::ConversionOperatorDeclaration => self.parse_conversion_operator(),
            CsSyntaxKind::PropertyDeclaration => self.parse_property(),
            CsSyntaxKind::IndexerDeclaration => self.parse_indexer(),
            _ => self.parse_field(),
        }
    }

    fn parse_type_members(&mut self) {
        while !self.at_end() && !self.at(CsSyntaxKind::RBrace) {
            let before = self.pos;
            self.parse_member(true);
            if self.pos == before {
                self.error_token("unexpected token");
            }
        }
    }

    /// class / struct / interface / record / record struct
    fn parse_type_declaration(&mut self, kind: CsSyntaxKind) {
        self.builder.start_node(kind);
        self.parse_attributes_and_modifiers();

        // `record`, `record class`, `record struct`, or the plain keyword
        let is_record = matches!(
            kind,
            CsSyntaxKind::RecordDeclaration | CsSyntaxKind::RecordStructDeclaration
        );
        self.bump();
        if is_record && matches!(self.current(), CsSyntaxKind::ClassKw | CsSyntaxKind::StructKw) {
            self.bump();
        }

        self.expect(CsSyntaxKind::Ident, "type name");
        if self.at(CsSyntaxKind::Lt) {
            self.parse_type_parameter_list();
        }
        if self.at(CsSyntaxKind::LParen) {
            self.parse_parameter_list(CsSyntaxKind::ParameterList);
        }
        if self.at(CsSyntaxKind::Colon) {
            self.parse_base_list();
        }
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }

        match self.current() {
            CsSyntaxKind::LBrace => {
                self.bump();
                self.parse_type_members();
                self.expect(CsSyntaxKind::RBrace, "'}'");
                if self.at(CsSyntaxKind::Semicolon) {
                    self.bump();
                }
            }
            CsSyntaxKind::Semicolon => self.bump(),
            _ => self.error("expected '{' or ';'"),
        }

        self.builder.finish_node();
    }

    fn parse_enum(&mut self) {
        self.builder.start_node(CsSyntaxKind::EnumDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.expect(CsSyntaxKind::Ident, "enum name");
        if self.at(CsSyntaxKind::Colon) {
            self.parse_base_list();
        }

        if self.expect(CsSyntaxKind::LBrace, "'{'") {
            while !self.at_end() && !self.at(CsSyntaxKind::RBrace) {
                let before = self.pos;
                self.parse_enum_member();
                if self.at(CsSyntaxKind::Comma) {
                    self.bump();
                }
                if self.pos == before {
                    self.recover("expected enum member");
                }
            }
            self.expect(CsSyntaxKind::RBrace, "'}'");
            if self.at(CsSyntaxKind::Semicolon) {
                self.bump();
            }
        }

        self.builder.finish_node();
    }

    fn parse_enum_member(&mut self) {
        if !matches!(
            self.current(),
            CsSyntaxKind::Ident | CsSyntaxKind::LBracket
        ) {
            return;
        }
        self.builder.start_node(CsSyntaxKind::EnumMemberDeclaration);
        while self.at(CsSyntaxKind::LBracket) {
            self.parse_attribute_list();
        }
        self.expect(CsSyntaxKind::Ident, "enum member name");
        if self.at(CsSyntaxKind::Equals) {
            self.parse_equals_value(&[CsSyntaxKind::Comma]);
        }
        self.builder.finish_node();
    }

    fn parse_delegate(&mut self) {
        self.builder.start_node(CsSyntaxKind::DelegateDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.parse_type();
        self.expect(CsSyntaxKind::Ident, "delegate name");
        if self.at(CsSyntaxKind::Lt) {
            self.parse_type_parameter_list();
        }
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_field(&mut self) {
        self.builder.start_node(CsSyntaxKind::FieldDeclaration);
        self.parse_attributes_and_modifiers();
        self.parse_variable_declaration();
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_event_field(&mut self) {
        self.builder.start_node(CsSyntaxKind::EventFieldDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.parse_variable_declaration();
        self.expect(CsSyntaxKind::Semicolon, "';'");
        self.builder.finish_node();
    }

    fn parse_variable_declaration(&mut self) {
        self.builder.start_node(CsSyntaxKind::VariableDeclaration);
        self.parse_type();
        loop {
            self.parse_variable_declarator();
            if !self.at(CsSyntaxKind::Comma) {
                break;
            }
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_variable_declarator(&mut self) {
        if !self.at(CsSyntaxKind::Ident) {
            self.error("expected variable name");
            return;
        }
        self.builder.start_node(CsSyntaxKind::VariableDeclarator);
        self.bump();
        // fixed-size buffer: `fixed byte data[16];`
        if self.at(CsSyntaxKind::LBracket) {
            self.bump_balanced(CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
        }
        if self.at(CsSyntaxKind::Equals) {
            self.parse_equals_value(&[CsSyntaxKind::Comma]);
        }
        self.builder.finish_node();
    }

    fn parse_event(&mut self) {
        self.builder.start_node(CsSyntaxKind::EventDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.parse_type();
        self.parse_member_name();
        self.parse_accessor_list();
        self.builder.finish_node();
    }

    fn parse_method(&mut self) {
        self.builder.start_node(CsSyntaxKind::MethodDeclaration);
        self.parse_attributes_and_modifiers();
        self.parse_type();
        self.parse_member_name();
        if self.at(CsSyntaxKind::Lt) {
            self.parse_type_parameter_list();
        }
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        while self.at_contextual("where") {
            self.parse_constraint_clause();
        }
        self.parse_body();
        self.builder.finish_node();
    }

    fn parse_constructor(&mut self) {
        self.builder.start_node(CsSyntaxKind::ConstructorDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        if self.at(CsSyntaxKind::Colon) {
            self.builder.start_node(CsSyntaxKind::ConstructorInitializer);
            self.bump();
            if matches!(self.current(), CsSyntaxKind::Ident | CsSyntaxKind::ThisKw) {
                self.bump();
            }
            if self.at(CsSyntaxKind::LParen) {
                self.bump_balanced(CsSyntaxKind::LParen, CsSyntaxKind::RParen);
            } else {
                self.error("expected '('");
            }
            self.builder.finish_node();
        }
        self.parse_body();
        self.builder.finish_node();
    }

    fn parse_destructor(&mut self) {
        self.builder.start_node(CsSyntaxKind::DestructorDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.expect(CsSyntaxKind::Ident, "type name");
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        self.parse_body();
        self.builder.finish_node();
    }

    fn parse_operator(&mut self) {
        self.builder.start_node(CsSyntaxKind::OperatorDeclaration);
        self.parse_attributes_and_modifiers();
        self.parse_type();
        self.bump();
        if self.at_contextual("checked") {
            self.bump();
        }
        // `+`, `==`, `true`, `>>` (two tokens), ...
        while !self.at_end()
            && !matches!(
                self.current(),
                CsSyntaxKind::LParen | CsSyntaxKind::LBrace | CsSyntaxKind::Semicolon
            )
        {
            self.bump();
        }
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        self.parse_body();
        self.builder.finish_node();
    }

    fn parse_conversion_operator(&mut self) {
        self.builder
            .start_node(CsSyntaxKind::ConversionOperatorDeclaration);
        self.parse_attributes_and_modifiers();
        self.bump();
        self.expect(CsSyntaxKind::OperatorKw, "'operator'");
        if self.at_contextual("checked") {
            self.bump();
        }
        self.parse_type();
        self.parse_parameter_list(CsSyntaxKind::ParameterList);
        self.parse_body();
        self.builder.finish_node();
    }

    fn parse_property(&mut self) {
        self.builder.start_node(CsSyntaxKind::PropertyDeclaration);
        self.parse_attributes_and_modifiers();
        self.parse_type();
        self.parse_member_name();
        match self.current() {
            CsSyntaxKind::LBrace => {
                self.parse_accessor_list();
                if self.at(CsSyntaxKind::Equals) {
                    self.parse_equals_value(&[]);
                    self.expect(CsSyntaxKind::Semicolon, "';'");
                }
            }
            CsSyntaxKind::FatArrow => self.parse_arrow_expression(),
            _ => self.error("expected accessor list or '=>'"),
        }
        self.builder.finish_node();
    }

    fn parse_indexer(&mut self) {
        self.builder.start_node(CsSyntaxKind::IndexerDeclaration);
        self.parse_attributes_and_modifiers();
        self.parse_type();
        if self.at(CsSyntaxKind::Ident) {
            self.builder
                .start_node(CsSyntaxKind::ExplicitInterfaceSpecifier);
            while !self.at_end()
                && !matches!(
                    self.current(),
                    CsSyntaxKind::ThisKw | CsSyntaxKind::LBracket | CsSyntaxKind::LBrace
                )
            {
                self.bump();
            }
            self.builder.finish_node();
        }
        self.expect(CsSyntaxKind::ThisKw, "'this'");
        self.parse_parameter_list(CsSyntaxKind::BracketedParameterList);
        match self.current() {
            CsSyntaxKind::LBrace => self.parse_accessor_list(),
            CsSyntaxKind::FatArrow => self.parse_arrow_expression(),
            _ => self.error("expected accessor list or '=>'"),
        }
        self.builder.finish_node();
    }

    // ==================
    // Member parts
    // ==================

    fn parse_type(&mut self) {
        let Some(end) = self.type_end(self.pos) else {
            self.error("expected type");
            return;
        };
        self.builder.start_node(CsSyntaxKind::Type);
        while self.pos < end {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_member_name(&mut self) {
        let Some((name, _)) = self.member_name_end(self.pos) else {
            self.error("expected member name");
            return;
        };
        if name > self.pos {
            self.builder
                .start_node(CsSyntaxKind::ExplicitInterfaceSpecifier);
            while self.pos < name {
                self.bump();
            }
            self.builder.finish_node();
        }
        self.bump();
    }

    fn parse_type_parameter_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::TypeParameterList);
        match self.type_args_end(self.pos) {
            Some(end) => {
                while self.pos < end {
                    self.bump();
                }
            }
            None => self.error_token("malformed type parameter list"),
        }
        self.builder.finish_node();
    }

    fn parse_base_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::BaseList);
        self.bump();
        self.skip_declaration_clause();
        self.builder.finish_node();
    }

    fn parse_constraint_clause(&mut self) {
        self.builder
            .start_node(CsSyntaxKind::TypeParameterConstraintClause);
        self.bump();
        self.skip_declaration_clause();
        self.builder.finish_node();
    }

    /// Bump a base list or constraint clause body up to the declaration body
    /// or the next `where`
    fn skip_declaration_clause(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            if depth == 0
                && (matches!(
                    kind,
                    CsSyntaxKind::LBrace
                        | CsSyntaxKind::RBrace
                        | CsSyntaxKind::Semicolon
                        | CsSyntaxKind::FatArrow
                ) || self.at_contextual("where"))
            {
                break;
            }
            match kind {
                CsSyntaxKind::Lt | CsSyntaxKind::LParen => depth += 1,
                CsSyntaxKind::Gt | CsSyntaxKind::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_parameter_list(&mut self, list_kind: CsSyntaxKind) {
        let (open, close) = if list_kind == CsSyntaxKind::BracketedParameterList {
            (CsSyntaxKind::LBracket, CsSyntaxKind::RBracket)
        } else {
            (CsSyntaxKind::LParen, CsSyntaxKind::RParen)
        };
        if !self.at(open) {
            self.error("expected parameter list");
            return;
        }

        self.builder.start_node(list_kind);
        self.bump();
        while !self.at_end() && !self.at(close) {
            self.parse_parameter(close);
            if !self.at(CsSyntaxKind::Comma) {
                break;
            }
            self.bump();
        }
        self.skip_error_until(&[
            close,
            CsSyntaxKind::LBrace,
            CsSyntaxKind::Semicolon,
            CsSyntaxKind::FatArrow,
        ]);
        self.expect(close, "closing bracket");
        self.builder.finish_node();
    }

    fn is_parameter_modifier_at(&self, idx: usize) -> bool {
        matches!(
            self.kind_at(idx),
            CsSyntaxKind::RefKw
                | CsSyntaxKind::OutKw
                | CsSyntaxKind::InKw
                | CsSyntaxKind::ParamsKw
                | CsSyntaxKind::ThisKw
                | CsSyntaxKind::ReadonlyKw
        ) || (self.is_contextual_at(idx, "scoped") && self.kind_at(idx + 1) != CsSyntaxKind::Comma)
    }

    fn parse_parameter(&mut self, close: CsSyntaxKind) {
        let starts_parameter = self.at(CsSyntaxKind::LBracket)
            || self.is_parameter_modifier_at(self.pos)
            || self.type_end(self.pos).is_some();
        if !starts_parameter {
            return;
        }

        self.builder.start_node(CsSyntaxKind::Parameter);
        while self.at(CsSyntaxKind::LBracket) {
            self.parse_attribute_list();
        }
        while self.is_parameter_modifier_at(self.pos) {
            self.bump();
        }
        self.parse_type();
        if self.at(CsSyntaxKind::Ident) {
            self.bump();
        }
        if self.at(CsSyntaxKind::Equals) {
            self.parse_equals_value(&[CsSyntaxKind::Comma, close]);
        }
        self.builder.finish_node();
    }

    fn parse_accessor_list(&mut self) {
        if !self.at(CsSyntaxKind::LBrace) {
            self.error("expected accessor list");
            return;
        }
        self.builder.start_node(CsSyntaxKind::AccessorList);
        self.bump();
        while !self.at_end() && !self.at(CsSyntaxKind::RBrace) {
            let before = self.pos;
            self.parse_accessor();
            if self.pos == before {
                self.error_token("expected accessor");
            }
        }
        self.expect(CsSyntaxKind::RBrace, "'}'");
        self.builder.finish_node();
    }

    fn parse_accessor(&mut self) {
        let mut idx = self.skip_attributes(self.pos);
        while self.kind_at(idx).is_modifier() {
            idx += 1;
        }
        if self.kind_at(idx) != CsSyntaxKind::Ident {
            return;
        }

        let kind = match self.text_at(idx) {
            "get" => CsSyntaxKind::GetAccessorDeclaration,
            "set" => CsSyntaxKind::SetAccessorDeclaration,
            "init" => CsSyntaxKind::InitAccessorDeclaration,
            "add" => CsSyntaxKind::AddAccessorDeclaration,
            "remove" => CsSyntaxKind::RemoveAccessorDeclaration,
            _ => CsSyntaxKind::UnknownAccessorDeclaration,
        };

        self.builder.start_node(kind);
        while self.at(CsSyntaxKind::LBracket) {
            self.parse_attribute_list();
        }
        while self.current().is_modifier() {
            self.bump();
        }
        self.bump();
        match self.current() {
            CsSyntaxKind::LBrace => self.parse_block(),
            CsSyntaxKind::FatArrow => self.parse_arrow_expression(),
            CsSyntaxKind::Semicolon => self.bump(),
            _ => self.error("expected accessor body"),
        }
        self.builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;

    fn parse_ok(source: &str) -> SyntaxNode {
        let parse = parse_cs(source);
        assert!(
            parse.errors().is_empty(),
            "unexpected parse errors for {source:?}: {:?}",
            parse.errors()
        );
        let root = parse.syntax();
        assert_eq!(root.text().to_string(), source);
        root
    }

    fn kinds_of(root: &SyntaxNode) -> Vec<CsSyntaxKind> {
        root.descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_file_scoped_namespace_owns_rest_of_file() {
        let root = parse_ok("namespace Foo.Bar;\nclass A {}\nclass B {}\n");
        let namespace = root.first_child().expect("namespace");
        assert_eq!(
            namespace.kind(),
            CsSyntaxKind::FileScopedNamespaceDeclaration
        );
        let types: Vec<_> = namespace
            .children()
            .filter(|n| n.kind() == CsSyntaxKind::ClassDeclaration)
            .collect();
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_block_namespace_with_usings() {
        let root = parse_ok(
            "global using System;\nusing IO = System.IO;\nnamespace A\n{\n    using B;\n    struct S { }\n}\n",
        );
        let kinds = kinds_of(&root);
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == CsSyntaxKind::UsingDirective)
                .count(),
            3
        );
        assert!(kinds.contains(&CsSyntaxKind::NamespaceDeclaration));
        assert!(kinds.contains(&CsSyntaxKind::StructDeclaration));
    }

    #[test]
    fn test_trailing_trivia_stays_on_line() {
        let root = parse_ok("namespace Foo; // note\nclass Bar {}");
        let namespace = root.first_child().expect("namespace");
        let semicolon = namespace
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == CsSyntaxKind::Semicolon)
            .expect("semicolon");
        let after: Vec<_> = std::iter::successors(semicolon.next_sibling_or_token(), |e| {
            e.next_sibling_or_token()
        })
        .take_while(|e| e.as_token().is_some_and(|t| t.kind().is_trivia()))
        .map(|e| e.kind())
        .collect();
        assert_eq!(
            after,
            vec![
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::CommentLine,
                CsSyntaxKind::Newline
            ]
        );
    }

    #[test]
    fn test_documentation_comment_grouping() {
        let source = "class C\n{\n    /// <summary>\n    /// Docs\n    /// </summary>\n    public int X;\n}\n";
        let root = parse_ok(source);
        let doc = root
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::DocumentationComment)
            .expect("doc comment");
        assert_eq!(
            doc.text().to_string(),
            "/// <summary>\n    /// Docs\n    /// </summary>\n"
        );
        assert_eq!(
            doc.parent().map(|p| p.kind()),
            Some(CsSyntaxKind::FieldDeclaration)
        );
    }

    #[test]
    fn test_trailing_doc_marker_is_plain_comment() {
        let root = parse_ok("class C { int x; /// not docs\n}");
        assert!(
            root.descendants()
                .all(|n| n.kind() != CsSyntaxKind::DocumentationComment)
        );
    }

    #[test]
    fn test_member_kinds() {
        let source = r#"public partial class Zoo<T> : Base, IZoo where T : class
{
    private const int Max = 10, Min = 0;
    public event EventHandler Changed;
    public event EventHandler Explicit { add { } remove { } }
    public Zoo(int size) : base(size) { }
    ~Zoo() { }
    public static Zoo<T> operator +(Zoo<T> a, Zoo<T> b) => a;
    public static implicit operator int(Zoo<T> z) => 0;
    public string Name { get; private set; } = "zoo";
    public int Count => 3;
    public T this[int index] { get => default; init { } }
    async Task<List<int>> LoadAsync<TKey>(TKey key, CancellationToken token = default) where TKey : notnull { await Task.Yield(); return new(); }
    void IZoo.Feed() { }
    public record Ticket(string Holder);
    enum Kind { Lion, Tiger = 2, }
    delegate void Handler(object sender);
}
"#;
        let root = parse_ok(source);
        let kinds = kinds_of(&root);
        for expected in [
            CsSyntaxKind::ClassDeclaration,
            CsSyntaxKind::TypeParameterList,
            CsSyntaxKind::BaseList,
            CsSyntaxKind::TypeParameterConstraintClause,
            CsSyntaxKind::FieldDeclaration,
            CsSyntaxKind::EventFieldDeclaration,
            CsSyntaxKind::EventDeclaration,
            CsSyntaxKind::AddAccessorDeclaration,
            CsSyntaxKind::RemoveAccessorDeclaration,
            CsSyntaxKind::ConstructorDeclaration,
            CsSyntaxKind::ConstructorInitializer,
            CsSyntaxKind::DestructorDeclaration,
            CsSyntaxKind::OperatorDeclaration,
            CsSyntaxKind::ConversionOperatorDeclaration,
            CsSyntaxKind::PropertyDeclaration,
            CsSyntaxKind::GetAccessorDeclaration,
            CsSyntaxKind::SetAccessorDeclaration,
            CsSyntaxKind::InitAccessorDeclaration,
            CsSyntaxKind::IndexerDeclaration,
            CsSyntaxKind::MethodDeclaration,
            CsSyntaxKind::ExplicitInterfaceSpecifier,
            CsSyntaxKind::RecordDeclaration,
            CsSyntaxKind::EnumDeclaration,
            CsSyntaxKind::EnumMemberDeclaration,
            CsSyntaxKind::DelegateDeclaration,
        ] {
            assert!(kinds.contains(&expected), "missing {expected:?}");
        }
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == CsSyntaxKind::VariableDeclarator)
                .count(),
            3
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == CsSyntaxKind::MethodDeclaration)
                .count(),
            2
        );
    }

    #[test]
    fn test_generic_initializer_does_not_split_declarators() {
        let root = parse_ok(
            "class C { private Dictionary<int, string> map = new Dictionary<int, string>(); }",
        );
        let declarators = root
            .descendants()
            .filter(|n| n.kind() == CsSyntaxKind::VariableDeclarator)
            .count();
        assert_eq!(declarators, 1);
    }

    #[test]
    fn test_record_struct_and_primary_constructor() {
        let root = parse_ok("public readonly record struct Point(int X, int Y);\n");
        let record = root.first_child().expect("record");
        assert_eq!(record.kind(), CsSyntaxKind::RecordStructDeclaration);
        let parameters = record
            .descendants()
            .filter(|n| n.kind() == CsSyntaxKind::Parameter)
            .count();
        assert_eq!(parameters, 2);
    }

    #[test]
    fn test_malformed_input_never_loops_and_round_trips() {
        let inputs = [
            "}}}",
            "class {",
            "namespace ;",
            "class C { int }",
            "class C { void M( { }",
            "class C { public int P { get; set }",
            "enum E { A = , B }",
            "Console.WriteLine(\"top level\");",
            "[assembly: Foo] class",
            "class C { event; operator }",
            "\"unterminated",
        ];
        for input in inputs {
            let parse = parse_cs(input);
            assert_eq!(parse.syntax().text().to_string(), input);
        }
    }

    #[test]
    fn test_errors_are_reported_in_error_nodes() {
        let parse = parse_cs("class C { + }");
        assert!(!parse.errors().is_empty());
        assert!(
            parse
                .syntax()
                .descendants()
                .any(|n| n.kind() == CsSyntaxKind::Error)
        );
    }

    #[test]
    fn test_eof_trivia_attaches_to_source_file() {
        let root = parse_ok("class C {}\n\n// trailing\n");
        let last = root.last_child_or_token().expect("last element");
        assert_eq!(last.kind(), CsSyntaxKind::Newline);
        assert_eq!(last.parent().map(|p| p.kind()), Some(CsSyntaxKind::SourceFile));
    }

    #[test]
    fn test_directives_are_trivia() {
        let root = parse_ok("#nullable enable\nnamespace N;\n\n#region Types\nclass C {}\n#endregion\n");
        let directives = root
            .descendants_with_tokens()
            .filter(|e| e.kind() == CsSyntaxKind::Directive)
            .count();
        assert_eq!(directives, 3);
    }
}
