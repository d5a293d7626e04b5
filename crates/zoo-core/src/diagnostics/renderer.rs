//! Diagnostic renderer with rich terminal output

use super::{Applicability, Diagnostic, Location, Severity, SourceMap};
use crate::console::{Color, Console};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text with a code frame
    #[default]
    Human,
    /// One line per diagnostic
    Compact,
    /// Pretty-printed JSON array
    Json,
}

/// Diagnostic renderer with rich formatting
///
/// Code frames are drawn from sources registered with
/// [`DiagnosticRenderer::with_source`]; other files are read from disk.
pub struct DiagnosticRenderer {
    console: Console,
    output_format: OutputFormat,
    sources: HashMap<PathBuf, String>,
}

impl DiagnosticRenderer {
    /// Create a renderer with automatic terminal detection (human output)
    pub fn new() -> Self {
        Self::with_console(Console::new(), OutputFormat::Human)
    }

    /// Create a renderer with colors disabled
    pub fn no_colors() -> Self {
        Self::with_console(Console::no_colors(), OutputFormat::Human)
    }

    /// Create a renderer with specific output format
    pub fn with_format(format: OutputFormat) -> Self {
        let console = match format {
            OutputFormat::Json | OutputFormat::Compact => Console::no_colors(),
            OutputFormat::Human => Console::new(),
        };
        Self::with_console(console, format)
    }

    pub fn with_console(console: Console, output_format: OutputFormat) -> Self {
        Self {
            console,
            output_format,
            sources: HashMap::new(),
        }
    }

    /// Register the text of `path` so code frames do not re-read the file
    pub fn with_source(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.add_source(path, text);
        self
    }

    pub fn add_source(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.sources.insert(path.into(), text.into());
    }

    pub fn format(&self) -> OutputFormat {
        self.output_format
    }

    /// Render a diagnostic with the configured output format
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        match self.output_format {
            OutputFormat::Human => self.render_human(diagnostic),
            OutputFormat::Compact => self.render_compact(diagnostic),
            OutputFormat::Json => self.render_json(std::slice::from_ref(diagnostic)),
        }
    }

    /// Render multiple diagnostics
    pub fn render_diagnostics(&self, diagnostics: &[Diagnostic]) -> String {
        match self.output_format {
            OutputFormat::Human => diagnostics
                .iter()
                .map(|d| self.render_human(d))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Compact => diagnostics
                .iter()
                .map(|d| self.render_compact(d))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json => self.render_json(diagnostics),
        }
    }

    fn render_human(&self, diagnostic: &Diagnostic) -> String {
        let mut output = self.render_header(diagnostic);
        output.push('\n');

        match self.render_code_frame(diagnostic) {
            Some(frame) => output.push_str(&frame),
            None => {
                output.push_str(&self.render_location_line(&diagnostic.location));
                output.push('\n');
            }
        }

        for suggestion in &diagnostic.suggestions {
            let label = match suggestion.applicability {
                Applicability::Always => self.console.colorize("Safe fix", Color::Green),
                Applicability::MaybeIncorrect => self.console.colorize("Unsafe fix", Color::Yellow),
            };
            output.push_str(&format!(
                "\n  {} {}: {} (apply with {})\n",
                self.console.colorize("i", Color::Blue),
                label,
                suggestion.message,
                self.console.colorize("--write", Color::Bold),
            ));
        }

        output
    }

    fn render_compact(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "{}: {}[{}]: {}",
            diagnostic.location, diagnostic.severity, diagnostic.rule_id, diagnostic.message
        )
    }

    fn render_json(&self, diagnostics: &[Diagnostic]) -> String {
        serde_json::to_string_pretty(diagnostics)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
    }

    /// severity[rule_id]: message
    fn render_header(&self, diagnostic: &Diagnostic) -> String {
        let severity_text = self
            .console
            .colorize(&diagnostic.severity.to_string(), severity_color(diagnostic.severity));
        let rule_id = self
            .console
            .colorize(&format!("[{}]", diagnostic.rule_id), Color::Dim);

        format!(
            "{}{}: {}",
            severity_text,
            rule_id,
            self.console.colorize(&diagnostic.message, Color::Bold)
        )
    }

    fn source_for(&self, path: &Path) -> Option<String> {
        match self.sources.get(path) {
            Some(text) => Some(text.clone()),
            None => fs::read_to_string(path).ok(),
        }
    }

    /// Code frame with two lines of context around the diagnostic's first line
    fn render_code_frame(&self, diagnostic: &Diagnostic) -> Option<String> {
        let location = &diagnostic.location;
        let source = self.source_for(&location.file)?;
        let map = SourceMap::new(&source);
        let lines: Vec<&str> = (0..map.line_count())
            .filter_map(|idx| map.line_span(idx))
            .filter_map(|span| source.get(span))
            .collect();

        let error_line = location.line;
        let error_col = location.column.max(1);
        let error_text = lines.get(error_line.checked_sub(1)?)?;
        let line_chars = error_text.chars().count();

        let caret_count = match (location.end_line, location.end_column) {
            (Some(end_line), Some(end_col)) if end_line == error_line => {
                end_col.saturating_sub(error_col)
            }
            (Some(_), Some(_)) => (line_chars + 1).saturating_sub(error_col),
            _ => location.length,
        }
        .max(1);

        let start_line = error_line.saturating_sub(2).max(1);
        let end_line = (error_line + 2).min(lines.len());
        let gutter_width = end_line.to_string().len();
        let highlight = severity_color(diagnostic.severity);

        let mut frame = String::new();
        frame.push_str(&format!(
            "  {}─[{}]\n",
            self.console.colorize("┌", Color::Blue),
            location
        ));
        frame.push_str(&format!("  {}\n", self.console.colorize("│", Color::Blue)));

        for line_num in start_line..=end_line {
            let line_content = lines.get(line_num - 1)?;
            let is_error_line = line_num == error_line;

            if is_error_line {
                frame.push_str(&self.console.colorize(">", highlight));
                frame.push(' ');
            } else {
                frame.push_str("  ");
            }
            frame.push_str(
                &self
                    .console
                    .colorize(&format!("{line_num:>gutter_width$}"), Color::Dim),
            );
            frame.push_str(&self.console.colorize(" │ ", Color::Dim));

            if is_error_line {
                frame.push_str(&self.highlight_in_line(
                    line_content,
                    error_col,
                    caret_count,
                    highlight,
                ));
                frame.push('\n');
                frame.push_str("  ");
                frame.push_str(&" ".repeat(gutter_width));
                frame.push_str(&self.console.colorize(" │ ", Color::Dim));
                frame.push_str(&" ".repeat(error_col - 1));
                frame.push_str(&self.console.colorize(&"^".repeat(caret_count), highlight));
            } else {
                frame.push_str(line_content);
            }
            frame.push('\n');
        }

        Some(frame)
    }

    /// Highlight `len` characters starting at 1-based column `col`
    fn highlight_in_line(&self, line: &str, col: usize, len: usize, color: Color) -> String {
        let start = line
            .char_indices()
            .nth(col - 1)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());
        let end = line
            .char_indices()
            .nth(col - 1 + len)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());

        format!(
            "{}{}{}",
            &line[..start],
            self.console.colorize(&line[start..end], color),
            &line[end..]
        )
    }

    fn render_location_line(&self, location: &Location) -> String {
        format!(
            "  {} {}",
            self.console.colorize("→", Color::Blue),
            self.console.colorize(&location.to_string(), Color::Dim)
        )
    }
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CodeSuggestion, SourceMap};
    use insta::assert_snapshot;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SOURCE: &str = "using System;\nnamespace Foo;\nclass Bar {}";

    fn namespace_diagnostic() -> Diagnostic {
        let map = SourceMap::new(SOURCE);
        let location = map.span_to_diagnostic_location(&(14..28), SOURCE, Path::new("Foo.cs"));
        Diagnostic::new(
            "style/file-scoped-namespace-empty-line",
            Severity::Warning,
            "File-scoped namespace 'Foo' should be followed by an empty line",
            location,
        )
        .with_suggestion(CodeSuggestion::safe(
            "Insert empty line after file-scoped namespace",
            "InsertEmptyLineAfterFileScopedNamespace",
        ))
    }

    #[test]
    fn test_render_human_snapshot() {
        let renderer = DiagnosticRenderer::no_colors().with_source("Foo.cs", SOURCE);
        assert_snapshot!(renderer.render(&namespace_diagnostic()).trim_end(), @r"
        warning[style/file-scoped-namespace-empty-line]: File-scoped namespace 'Foo' should be followed by an empty line
          ┌─[Foo.cs:2:1]
          │
          1 │ using System;
        > 2 │ namespace Foo;
            │ ^^^^^^^^^^^^^^
          3 │ class Bar {}

          i Safe fix: Insert empty line after file-scoped namespace (apply with --write)
        ");
    }

    #[test]
    fn test_render_compact() {
        let renderer = DiagnosticRenderer::with_format(OutputFormat::Compact);
        assert_eq!(
            renderer.render(&namespace_diagnostic()),
            "Foo.cs:2:1: warning[style/file-scoped-namespace-empty-line]: File-scoped namespace 'Foo' should be followed by an empty line"
        );
    }

    #[test]
    fn test_render_json_array() {
        let renderer = DiagnosticRenderer::with_format(OutputFormat::Json);
        let output = renderer.render_diagnostics(&[namespace_diagnostic(), namespace_diagnostic()]);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert_eq!(parsed[0]["rule_id"], "style/file-scoped-namespace-empty-line");
        assert_eq!(parsed[0]["location"]["line"], 2);
    }

    #[test]
    fn test_code_frame_reads_file_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "class Whitelist {{}}").expect("write");

        let location = Location::with_end(file.path().to_path_buf(), 1, 7, 1, 16, 6, 9);
        let diagnostic = Diagnostic::new("style/inclusive-terminology", Severity::Error, "m", location);
        let output = DiagnosticRenderer::no_colors().render(&diagnostic);

        assert!(output.contains("> 1 │ class Whitelist {}"));
        assert!(output.contains("│       ^^^^^^^^^"));
    }

    #[test]
    fn test_missing_file_falls_back_to_location_line() {
        let location = Location::new(PathBuf::from("missing/Nope.cs"), 3, 5, 0, 1);
        let diagnostic = Diagnostic::new("style/test", Severity::Info, "m", location);
        let output = DiagnosticRenderer::no_colors().render(&diagnostic);

        assert_eq!(output, "info[style/test]: m\n  → missing/Nope.cs:3:5\n");
    }

    #[test]
    fn test_multiline_span_carets_stop_at_line_end() {
        let source = "/// whitelist\n/// more\nclass C {}";
        let map = SourceMap::new(source);
        let location = map.span_to_diagnostic_location(&(0..23), source, Path::new("C.cs"));
        let diagnostic = Diagnostic::new("style/test", Severity::Warning, "m", location);
        let output = DiagnosticRenderer::no_colors()
            .with_source("C.cs", source)
            .render(&diagnostic);

        assert!(output.contains(&format!("  │ {}\n", "^".repeat(13))));
    }
}
