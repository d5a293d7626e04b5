//! CST-aware lexer that preserves all trivia (whitespace, comments, directives)
//!
//! Every byte of the input ends up in exactly one token, so concatenating the
//! token texts reproduces the source. Malformed input (unterminated strings or
//! comments, stray characters) still produces tokens; the problems are reported
//! separately as [`LexerError`]s.

use crate::cst::CsSyntaxKind;
use std::ops::Range;

/// Simple span representing a range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: CsSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: CsSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

/// Two-character operators recognised as a single token.
///
/// Nothing starting with `>` is listed: `>>` has to stay two tokens so nested
/// generic argument lists close correctly.
const TWO_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", "<<", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "??", "->",
];

/// Lex input preserving ALL trivia for CST construction
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;
    // Only whitespace seen since the last line break
    let mut at_line_start = true;

    while i < len {
        let Some((current, size)) = next_char(input, i) else {
            break;
        };
        let start = i;

        let (kind, end) = match current {
            '\n' => (CsSyntaxKind::Newline, i + size),
            '\r' => {
                let mut end = i + size;
                if let Some(('\n', nl_size)) = next_char(input, end) {
                    end += nl_size;
                }
                (CsSyntaxKind::Newline, end)
            }
            c if is_inline_whitespace(c) => {
                let mut end = i + size;
                while let Some((c, step)) = next_char(input, end) {
                    if !is_inline_whitespace(c) {
                        break;
                    }
                    end += step;
                }
                (CsSyntaxKind::Whitespace, end)
            }
            '#' if at_line_start => (CsSyntaxKind::Directive, line_end(input, start)),
            '/' => match next_char(input, i + size) {
                Some(('/', _)) => {
                    let end = line_end(input, start);
                    let text = &input[start..end];
                    // `////` is an ordinary comment, not documentation
                    let kind = if text.starts_with("///") && !text.starts_with("////") {
                        CsSyntaxKind::DocCommentLine
                    } else {
                        CsSyntaxKind::CommentLine
                    };
                    (kind, end)
                }
                Some(('*', _)) => {
                    let (end, terminated) = lex_block_comment(input, start);
                    if !terminated {
                        errors.push(LexerError::new(
                            "Unterminated block comment",
                            span(start, end),
                        ));
                    }
                    let text = &input[start..end];
                    let kind = if text.starts_with("/**") && !text.starts_with("/**/") {
                        CsSyntaxKind::DocCommentBlock
                    } else {
                        CsSyntaxKind::CommentBlock
                    };
                    (kind, end)
                }
                _ => lex_operator(input, start),
            },
            '"' => {
                let (end, error) = lex_string(input, start);
                errors.extend(error);
                (CsSyntaxKind::StringLit, end)
            }
            '\'' => {
                let (end, error) = lex_char(input, start);
                errors.extend(error);
                (CsSyntaxKind::CharLit, end)
            }
            '$' | '@' if string_prefix_len(input, start).is_some() => {
                let (end, error) = lex_string(input, start);
                errors.extend(error);
                (CsSyntaxKind::StringLit, end)
            }
            '@' if next_char(input, i + size).is_some_and(|(c, _)| is_ident_start(c)) => {
                // Verbatim identifier: never a keyword
                (CsSyntaxKind::Ident, lex_ident_tail(input, i + size))
            }
            c if is_ident_start(c) => {
                let end = lex_ident_tail(input, start);
                let kind =
                    CsSyntaxKind::from_keyword(&input[start..end]).unwrap_or(CsSyntaxKind::Ident);
                (kind, end)
            }
            c if c.is_ascii_digit() => (CsSyntaxKind::NumberLit, lex_number(input, start)),
            '.' if next_char(input, i + size).is_some_and(|(c, _)| c.is_ascii_digit()) => {
                (CsSyntaxKind::NumberLit, lex_number(input, start))
            }
            ';' => (CsSyntaxKind::Semicolon, i + size),
            ',' => (CsSyntaxKind::Comma, i + size),
            '.' => (CsSyntaxKind::Dot, i + size),
            ':' => match next_char(input, i + size) {
                Some((':', next_size)) => (CsSyntaxKind::ColonColon, i + size + next_size),
                _ => (CsSyntaxKind::Colon, i + size),
            },
            '=' => match next_char(input, i + size) {
                Some(('>', next_size)) => (CsSyntaxKind::FatArrow, i + size + next_size),
                Some(('=', next_size)) => (CsSyntaxKind::Operator, i + size + next_size),
                _ => (CsSyntaxKind::Equals, i + size),
            },
            '{' => (CsSyntaxKind::LBrace, i + size),
            '}' => (CsSyntaxKind::RBrace, i + size),
            '(' => (CsSyntaxKind::LParen, i + size),
            ')' => (CsSyntaxKind::RParen, i + size),
            '[' => (CsSyntaxKind::LBracket, i + size),
            ']' => (CsSyntaxKind::RBracket, i + size),
            '>' => (CsSyntaxKind::Gt, i + size),
            '~' => (CsSyntaxKind::Tilde, i + size),
            '<' | '?' | '*' | '+' | '-' | '!' | '&' | '|' | '^' | '%' => {
                lex_operator(input, start)
            }
            _ => {
                errors.push(LexerError::new(
                    format!("Unexpected character '{current}'"),
                    span(start, i + size),
                ));
                (CsSyntaxKind::Unknown, i + size)
            }
        };

        match kind {
            CsSyntaxKind::Newline => at_line_start = true,
            CsSyntaxKind::Whitespace => {}
            _ => at_line_start = false,
        }

        tokens.push(CstToken::new(kind, &input[start..end], span(start, end)));
        i = end;
    }

    (tokens, errors)
}

fn is_inline_whitespace(c: char) -> bool {
    // U+FEFF: byte order mark
    c != '\n' && c != '\r' && (c.is_whitespace() || c == '\u{feff}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Offset of the next line break (or end of input) from `start`
fn line_end(input: &str, start: usize) -> usize {
    input[start..]
        .find(['\n', '\r'])
        .map_or(input.len(), |rel| start + rel)
}

fn lex_ident_tail(input: &str, start: usize) -> usize {
    let mut end = start;
    while let Some((c, step)) = next_char(input, end) {
        if !is_ident_continue(c) {
            break;
        }
        end += step;
    }
    end
}

/// Lex `/* ... */`, returning the end offset and whether it was terminated
fn lex_block_comment(input: &str, start: usize) -> (usize, bool) {
    match input[start + 2..].find("*/") {
        Some(rel) => (start + 2 + rel + 2, true),
        None => (input.len(), false),
    }
}

fn lex_operator(input: &str, start: usize) -> (CsSyntaxKind, usize) {
    let rest = &input[start..];
    if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
        return (CsSyntaxKind::Operator, start + op.len());
    }

    let kind = match rest.as_bytes()[0] {
        b'<' => CsSyntaxKind::Lt,
        b'?' => CsSyntaxKind::Question,
        b'*' => CsSyntaxKind::Star,
        _ => CsSyntaxKind::Operator,
    };
    (kind, start + 1)
}

fn lex_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() {
        let b = bytes[end];
        let exponent_sign = (b == b'+' || b == b'-')
            && end > start
            && matches!(bytes[end - 1], b'e' | b'E')
            && !input[start..end].starts_with("0x")
            && !input[start..end].starts_with("0X");
        let fraction_dot =
            b == b'.' && bytes.get(end + 1).is_some_and(|next| next.is_ascii_digit());
        if b.is_ascii_alphanumeric() || b == b'_' || exponent_sign || fraction_dot {
            end += 1;
        } else {
            break;
        }
    }
    end
}

/// Length of a string literal prefix (`$`, `@`, `$@`, `@$`, `$$...`) when it is
/// directly followed by a quote
fn string_prefix_len(input: &str, start: usize) -> Option<usize> {
    let prefix_len = input[start..]
        .bytes()
        .take_while(|b| *b == b'$' || *b == b'@')
        .count();
    (prefix_len > 0 && input[start + prefix_len..].starts_with('"')).then_some(prefix_len)
}

/// Lex any string literal form: regular, verbatim, interpolated, or raw
fn lex_string(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let prefix_len = string_prefix_len(input, start).unwrap_or(0);
    let prefix = &input[start..start + prefix_len];
    let quote_start = start + prefix_len;

    let quote_run = input[quote_start..]
        .bytes()
        .take_while(|b| *b == b'"')
        .count();
    if quote_run >= 3 {
        return lex_raw_string(input, start, quote_start, quote_run);
    }

    let verbatim = prefix.contains('@');
    let interpolated = prefix.contains('$');
    lex_quoted(input, start, quote_start + 1, verbatim, interpolated)
}

fn lex_raw_string(
    input: &str,
    start: usize,
    quote_start: usize,
    quote_run: usize,
) -> (usize, Option<LexerError>) {
    let delimiter = "\"".repeat(quote_run);
    let body_start = quote_start + quote_run;
    match input[body_start..].find(&delimiter) {
        Some(rel) => {
            // Closing run may be longer than the opening one only by error; take it whole
            let mut end = body_start + rel + quote_run;
            while input[end..].starts_with('"') {
                end += 1;
            }
            (end, None)
        }
        None => (
            input.len(),
            Some(LexerError::new(
                "Unterminated raw string literal",
                span(start, input.len()),
            )),
        ),
    }
}

/// Lex the body of a quoted string starting at `body_start` (just past the
/// opening quote). Interpolation holes may contain nested string literals.
fn lex_quoted(
    input: &str,
    start: usize,
    body_start: usize,
    verbatim: bool,
    interpolated: bool,
) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = body_start;
    let mut hole_depth = 0usize;

    while i < len {
        let b = bytes[i];
        if hole_depth > 0 {
            match b {
                b'{' => hole_depth += 1,
                b'}' => hole_depth -= 1,
                b'"' | b'$' | b'@' if b == b'"' || string_prefix_len(input, i).is_some() => {
                    let (end, error) = lex_string(input, i);
                    if error.is_some() {
                        return (end, error);
                    }
                    i = end;
                    continue;
                }
                b'\'' => {
                    let (end, _) = lex_char(input, i);
                    i = end;
                    continue;
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        match b {
            b'"' if verbatim && bytes.get(i + 1) == Some(&b'"') => i += 2,
            b'"' => return (i + 1, None),
            b'\\' if !verbatim => i += 2,
            b'{' if interpolated && bytes.get(i + 1) == Some(&b'{') => i += 2,
            b'{' if interpolated => {
                hole_depth = 1;
                i += 1;
            }
            b'\n' | b'\r' if !verbatim => {
                return (
                    i,
                    Some(LexerError::new("Unterminated string literal", span(start, i))),
                );
            }
            _ => i += 1,
        }
    }

    (
        len,
        Some(LexerError::new(
            "Unterminated string literal",
            span(start, len),
        )),
    )
}

fn lex_char(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => return (i + 1, None),
            b'\\' => i += 2,
            b'\n' | b'\r' => break,
            _ => i += 1,
        }
    }
    let end = i.min(bytes.len());
    (
        end,
        Some(LexerError::new(
            "Unterminated character literal",
            span(start, end),
        )),
    )
}

/// Get next character and its UTF-8 size
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input.get(pos..)?.chars().next().map(|c| (c, c.len_utf8()))
}

/// Create a span from start to end
fn span(start: usize, end: usize) -> CstSpan {
    start..end
}
