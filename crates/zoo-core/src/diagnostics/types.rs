//! Diagnostic types and utilities for C# style checking
//!
//! Provides diagnostics with:
//! - Precise code positioning with line/column information
//! - Positional message arguments alongside the rendered message
//! - Fix hints for rules that ship a fix provider

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Represents a diagnostic message from a style rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique identifier for the rule that generated this diagnostic
    pub rule_id: String,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message, with the arguments substituted
    pub message: String,
    /// Positional arguments the message was formatted with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    /// Location in the source file
    pub location: Location,
    /// Fixes that can be applied for this diagnostic
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<CodeSuggestion>,
    /// Category of the diagnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DiagnosticCategory>,
}

/// Severity levels for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Warnings that should be addressed
    #[default]
    Warning,
    /// Errors that must be fixed
    Error,
}

/// Location information for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Optional end position for ranges
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    /// Byte offset in the file
    pub offset: usize,
    /// Length of the span in bytes
    pub length: usize,
}

/// Indicates how a tool should manage this suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Applicability {
    /// The fix only touches trivia and is applied by `--write`
    Always,
    /// The fix may change meaning and needs review
    MaybeIncorrect,
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applicability::Always => write!(f, "safe"),
            Applicability::MaybeIncorrect => write!(f, "unsafe"),
        }
    }
}

/// A fix offered for a diagnostic
///
/// Fixes are tree rewrites performed by a fix provider, so the suggestion
/// carries the provider's title and equivalence key rather than replacement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSuggestion {
    /// Description of the suggested fix
    pub message: String,
    /// Key grouping equivalent fixes across diagnostics
    pub equivalence_key: String,
    /// When this suggestion should be applied
    pub applicability: Applicability,
}

impl CodeSuggestion {
    pub fn safe(message: impl Into<String>, equivalence_key: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            equivalence_key: equivalence_key.into(),
            applicability: Applicability::Always,
        }
    }
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            message_args: Vec::new(),
            location,
            suggestions: Vec::new(),
            category: None,
        }
    }

    /// Create a diagnostic from a message template with `{0}`, `{1}`, ... placeholders
    pub fn from_template(
        rule_id: impl Into<String>,
        severity: Severity,
        template: &str,
        args: Vec<String>,
        location: Location,
    ) -> Self {
        let message = format_message(template, &args);
        Self {
            message_args: args,
            ..Self::new(rule_id, severity, message, location)
        }
    }

    /// Add a code suggestion to this diagnostic
    pub fn with_suggestion(mut self, suggestion: CodeSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Set the category for this diagnostic
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the severity, keeping everything else
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this diagnostic has any safe fixes
    pub fn has_safe_fixes(&self) -> bool {
        self.suggestions
            .iter()
            .any(|s| s.applicability == Applicability::Always)
    }

    /// Byte range the diagnostic covers
    pub fn span(&self) -> Range<usize> {
        self.location.offset..self.location.offset + self.location.length
    }
}

/// Substitute positional `{N}` placeholders; unknown placeholders are left as written
pub fn format_message(template: &str, args: &[String]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((args.get(index)?, close))
        });
        match substituted {
            Some((arg, close)) => {
                message.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}

impl Location {
    /// Create a new location
    pub fn new(file: PathBuf, line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            file,
            line,
            column,
            end_line: None,
            end_column: None,
            offset,
            length,
        }
    }

    /// Create a location with end position
    pub fn with_end(
        file: PathBuf,
        line: usize,
        column: usize,
        end_line: usize,
        end_column: usize,
        offset: usize,
        length: usize,
    ) -> Self {
        Self {
            file,
            line,
            column,
            end_line: Some(end_line),
            end_column: Some(end_column),
            offset,
            length,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Trait for collecting and managing diagnostics
pub trait DiagnosticCollector {
    /// Collect a diagnostic
    fn collect(&mut self, diagnostic: Diagnostic);

    /// Collect multiple diagnostics
    fn collect_all(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.collect(diagnostic);
        }
    }

    /// Get all collected diagnostics
    fn diagnostics(&self) -> &[Diagnostic];
}

/// Default implementation of DiagnosticCollector
#[derive(Debug, Clone, Default)]
pub struct DefaultDiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DefaultDiagnosticCollector {
    /// Create a new diagnostic collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort diagnostics by location (file, then offset, then rule)
    pub fn sort_by_location(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then_with(|| a.location.offset.cmp(&b.location.offset))
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
    }

    /// Drop diagnostics below `min_severity`
    pub fn retain_min_severity(&mut self, min_severity: Severity) {
        self.diagnostics.retain(|d| d.severity >= min_severity);
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticCollector for DefaultDiagnosticCollector {
    fn collect(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Category for diagnostic classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCategory {
    /// Naming, wording and layout conventions
    Style,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Style => f.write_str("style"),
        }
    }
}

/// Source map for byte offset to line/column conversion
///
/// Line breaks are `\n`, `\r\n` and a lone `\r`, matching the lexer.
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Byte offset of each line start (line 0, line 1, ...)
    line_starts: Vec<usize>,
    /// Byte offset where each line's content ends, before its line break
    line_ends: Vec<usize>,
}

impl SourceMap {
    /// Create a source map from source text
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        let mut line_ends = Vec::new();
        let mut idx = 0;

        while idx < bytes.len() {
            match bytes[idx] {
                b'\r' if bytes.get(idx + 1) == Some(&b'\n') => {
                    line_ends.push(idx);
                    idx += 2;
                    line_starts.push(idx);
                }
                b'\r' | b'\n' => {
                    line_ends.push(idx);
                    idx += 1;
                    line_starts.push(idx);
                }
                _ => idx += 1,
            }
        }
        line_ends.push(bytes.len());

        Self {
            line_starts,
            line_ends,
        }
    }

    /// Number of lines; an empty source has one empty line
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-based index of the line containing `offset`
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Byte range of the 0-based line `line`, excluding its line break
    pub fn line_span(&self, line: usize) -> Option<Range<usize>> {
        Some(*self.line_starts.get(line)?..*self.line_ends.get(line)?)
    }

    /// Convert byte offset to 1-based (line, column), counting columns in characters
    pub fn offset_to_position(&self, offset: usize, source: &str) -> (usize, usize) {
        let line_idx = self.line_index(offset);
        let line_start = self.line_starts[line_idx];
        let end = offset.min(source.len()).max(line_start);
        let column = source
            .get(line_start..end)
            .map(|text| text.chars().count())
            .unwrap_or(end - line_start)
            + 1;

        (line_idx + 1, column)
    }

    /// Convert a span to `(start_line, start_col, end_line, end_col)`, all 1-based
    pub fn span_to_location(
        &self,
        span: &Range<usize>,
        source: &str,
    ) -> (usize, usize, usize, usize) {
        let (start_line, start_col) = self.offset_to_position(span.start, source);
        let (end_line, end_col) = self.offset_to_position(span.end, source);
        (start_line, start_col, end_line, end_col)
    }

    /// Create a Location struct from a span
    pub fn span_to_diagnostic_location(
        &self,
        span: &Range<usize>,
        source: &str,
        file_path: &Path,
    ) -> Location {
        let (line, column, end_line, end_column) = self.span_to_location(span, source);
        Location::with_end(
            file_path.to_path_buf(),
            line,
            column,
            end_line,
            end_column,
            span.start,
            span.end.saturating_sub(span.start),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new(PathBuf::from("Foo.cs"), 1, 1, 0, 3)
    }

    #[test]
    fn test_format_message_substitutes_positional_args() {
        let message = format_message(
            "'{0}' contains non-inclusive terminology; consider using: {1}",
            &["BlackList".to_string(), "deny list".to_string()],
        );
        assert_eq!(
            message,
            "'BlackList' contains non-inclusive terminology; consider using: deny list"
        );
    }

    #[test]
    fn test_format_message_keeps_unknown_placeholders() {
        let message = format_message("{0} {2} {x} {", &["a".to_string()]);
        assert_eq!(message, "a {2} {x} {");
    }

    #[test]
    fn test_diagnostic_from_template_keeps_args() {
        let diagnostic = Diagnostic::from_template(
            "style/test",
            Severity::Warning,
            "Namespace '{0}'",
            vec!["Foo".to_string()],
            location(),
        )
        .with_category(DiagnosticCategory::Style);

        assert_eq!(diagnostic.message, "Namespace 'Foo'");
        assert_eq!(diagnostic.message_args, vec!["Foo"]);
        assert_eq!(diagnostic.span(), 0..3);
        assert_eq!(diagnostic.category, Some(DiagnosticCategory::Style));
    }

    #[test]
    fn test_severity_ordering_and_parsing() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("ERROR".parse::<Severity>(), Ok(Severity::Error));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_collector_retains_min_severity() {
        let mut collector = DefaultDiagnosticCollector::new();
        collector.collect_all(vec![
            Diagnostic::new("a", Severity::Error, "e", location()),
            Diagnostic::new("b", Severity::Info, "i", location()),
            Diagnostic::new("c", Severity::Warning, "w", location()),
        ]);
        assert_eq!(collector.diagnostics().len(), 3);

        collector.retain_min_severity(Severity::Warning);
        let messages: Vec<_> = collector
            .into_diagnostics()
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(messages, vec!["e", "w"]);
    }

    #[test]
    fn test_collector_sorts_by_offset() {
        let mut collector = DefaultDiagnosticCollector::new();
        let late = Location::new(PathBuf::from("Foo.cs"), 3, 1, 40, 1);
        collector.collect(Diagnostic::new("a", Severity::Warning, "late", late));
        collector.collect(Diagnostic::new("a", Severity::Warning, "early", location()));
        collector.sort_by_location();

        let messages: Vec<_> = collector
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["early", "late"]);
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diagnostic = Diagnostic::new("style/test", Severity::Warning, "msg", location())
            .with_suggestion(CodeSuggestion::safe("Fix it", "FixIt"));
        let json = serde_json::to_value(&diagnostic).expect("serialize");

        assert_eq!(json["severity"], "warning");
        assert_eq!(json["suggestions"][0]["applicability"], "always");
        assert_eq!(json["suggestions"][0]["equivalenceKey"], "FixIt");
        assert!(json.get("message_args").is_none());
        assert!(diagnostic.has_safe_fixes());
    }

    #[test]
    fn test_source_map_single_line() {
        let source = "namespace Foo;";
        let map = SourceMap::new(source);

        assert_eq!(map.offset_to_position(0, source), (1, 1));
        assert_eq!(map.offset_to_position(10, source), (1, 11));
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.line_span(0), Some(0..14));
    }

    #[test]
    fn test_source_map_line_endings() {
        let source = "a\r\nbc\rd\n";
        let map = SourceMap::new(source);

        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_span(0), Some(0..1));
        assert_eq!(map.line_span(1), Some(3..5));
        assert_eq!(map.line_span(2), Some(6..7));
        assert_eq!(map.line_span(3), Some(8..8));
        assert_eq!(map.line_span(4), None);
        assert_eq!(map.offset_to_position(4, source), (2, 2));
        assert_eq!(map.offset_to_position(6, source), (3, 1));
    }

    #[test]
    fn test_source_map_unicode_columns() {
        let source = "class Café { }";
        let map = SourceMap::new(source);

        // 'é' is two bytes but one column
        assert_eq!(map.offset_to_position(11, source), (1, 11));
    }

    #[test]
    fn test_span_to_diagnostic_location() {
        let source = "namespace Foo;\nclass Bar {}";
        let map = SourceMap::new(source);
        let location = map.span_to_diagnostic_location(&(21..24), source, Path::new("Foo.cs"));

        assert_eq!(location.line, 2);
        assert_eq!(location.column, 7);
        assert_eq!(location.end_line, Some(2));
        assert_eq!(location.end_column, Some(10));
        assert_eq!(location.offset, 21);
        assert_eq!(location.length, 3);
        assert_eq!(location.to_string(), "Foo.cs:2:7");
    }
}
