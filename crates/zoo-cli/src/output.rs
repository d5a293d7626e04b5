//! Output formatting and reporting

use anyhow::Context;
use colored::Colorize;
use zoo_core::{
    Console, Diagnostic, DiagnosticRenderer, Document, OutputFormat as CoreOutputFormat, Severity,
};

use crate::OutputFormat;

/// Summary statistics for linting results
#[derive(Debug, Clone, Default)]
pub struct LintSummary {
    pub files_checked: usize,
    pub files_unreadable: usize,
    pub units_skipped: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub fixes_applied: usize,
    /// Files whose fixes could not be written
    pub fixes_failed: usize,
    /// Fixes found by `--dry-run`
    pub fixes_available: usize,
}

impl LintSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count reported diagnostics by severity
    pub fn count(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Info => self.info += 1,
            }
        }
    }

    pub fn total_issues(&self) -> usize {
        self.errors + self.warnings + self.info
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Format and print linting results
    ///
    /// `documents` provide the code frames of the human format; `diffs` are
    /// the fixes proposed by a dry run.
    pub fn print_results(
        &self,
        diagnostics: &[Diagnostic],
        documents: &[Document],
        diffs: &[String],
        summary: &LintSummary,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_diffs(diffs);
                self.print_human_format(diagnostics, documents, summary);
                Ok(())
            }
            OutputFormat::Json => self.print_json_format(diagnostics, diffs, summary),
            OutputFormat::Compact => {
                self.print_diffs(diffs);
                self.print_compact_format(diagnostics, summary);
                Ok(())
            }
        }
    }

    fn print_diffs(&self, diffs: &[String]) {
        for diff in diffs {
            println!("{diff}");
        }
    }

    fn print_human_format(
        &self,
        diagnostics: &[Diagnostic],
        documents: &[Document],
        summary: &LintSummary,
    ) {
        if !diagnostics.is_empty() {
            let mut renderer = DiagnosticRenderer::with_console(
                Console::with_colors(self.use_colors),
                CoreOutputFormat::Human,
            );
            for document in documents {
                renderer.add_source(document.path(), document.text());
            }
            println!("{}", renderer.render_diagnostics(diagnostics));
        }

        self.print_summary_human(summary);
    }

    fn print_summary_human(&self, summary: &LintSummary) {
        println!("\n{}", "Summary:".bold());
        println!("  Files checked: {}", summary.files_checked);
        if summary.files_unreadable > 0 {
            println!(
                "  Files skipped: {}",
                summary.files_unreadable.to_string().yellow()
            );
        }

        if summary.has_issues() {
            println!("  Issues found:");
            if summary.errors > 0 {
                println!("    Errors: {}", summary.errors.to_string().red());
            }
            if summary.warnings > 0 {
                println!("    Warnings: {}", summary.warnings.to_string().yellow());
            }
            if summary.info > 0 {
                println!("    Info: {}", summary.info.to_string().blue());
            }
        } else {
            println!("  {}", "No issues found".green());
        }

        if summary.fixes_applied > 0 {
            println!(
                "  Fixes applied: {}",
                summary.fixes_applied.to_string().green()
            );
        }
        if summary.fixes_failed > 0 {
            println!(
                "  Fixes failed: {} file(s) could not be written",
                summary.fixes_failed.to_string().red()
            );
        }
        if summary.fixes_available > 0 {
            println!(
                "  Fixes available: {} (run with --write to apply)",
                summary.fixes_available.to_string().green()
            );
        }
    }

    fn print_json_format(
        &self,
        diagnostics: &[Diagnostic],
        diffs: &[String],
        summary: &LintSummary,
    ) -> anyhow::Result<()> {
        let renderer = DiagnosticRenderer::with_format(CoreOutputFormat::Json);
        let issues: serde_json::Value = serde_json::from_str(&renderer.render_diagnostics(diagnostics))
            .context("Failed to parse diagnostics JSON")?;

        let result = serde_json::json!({
            "files_checked": summary.files_checked,
            "issues": issues,
            "fixes": diffs,
            "summary": {
                "errors": summary.errors,
                "warnings": summary.warnings,
                "info": summary.info,
                "total": summary.total_issues(),
                "files_unreadable": summary.files_unreadable,
                "units_skipped": summary.units_skipped,
                "fixes_applied": summary.fixes_applied,
                "fixes_failed": summary.fixes_failed,
                "fixes_available": summary.fixes_available
            }
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize JSON")?
        );
        Ok(())
    }

    fn print_compact_format(&self, diagnostics: &[Diagnostic], summary: &LintSummary) {
        if !diagnostics.is_empty() {
            let renderer = DiagnosticRenderer::with_format(CoreOutputFormat::Compact);
            println!("{}", renderer.render_diagnostics(diagnostics));
        }

        if summary.has_issues() {
            println!(
                "zoo: {} files, {} issues ({} errors, {} warnings)",
                summary.files_checked,
                summary.total_issues(),
                summary.errors,
                summary.warnings
            );
        } else {
            println!("zoo: {} files checked, no issues", summary.files_checked);
        }

        if summary.fixes_applied > 0 {
            println!("zoo: {} fixes applied", summary.fixes_applied);
        }
        if summary.fixes_failed > 0 {
            println!("zoo: {} files could not be written", summary.fixes_failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoo_core::Location;

    fn diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic::new(
            "style/inclusive-terminology",
            severity,
            "message",
            Location::new("Lion.cs".into(), 1, 1, 0, 4),
        )
    }

    #[test]
    fn test_summary_counts_by_severity() {
        let mut summary = LintSummary::new();
        summary.count(&[
            diagnostic(Severity::Warning),
            diagnostic(Severity::Warning),
            diagnostic(Severity::Error),
            diagnostic(Severity::Info),
        ]);

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.total_issues(), 4);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_empty_summary_has_no_issues() {
        let summary = LintSummary::new();
        assert!(!summary.has_issues());
        assert!(!summary.has_errors());
    }
}
