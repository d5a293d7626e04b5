//! Fix results and diff previews
//!
//! Fixes are computed by the rule crate's fix providers as whole-tree
//! rewrites. This module holds what the host does with the result: report it,
//! preview it as a unified diff, or write it back to disk.

use crate::console::{Color, Console};
use crate::error::ZooError;
use crate::result::Result;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of applying fixes to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixResult {
    /// Path to the file the fixes belong to
    pub file: PathBuf,
    /// Number of fixes that changed the text
    pub applied_count: usize,
    /// Text before any fix was applied
    pub original_content: String,
    /// The modified content, when at least one fix applied
    pub modified_content: Option<String>,
}

impl FixResult {
    pub fn unchanged(file: impl Into<PathBuf>, original_content: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            applied_count: 0,
            original_content: original_content.into(),
            modified_content: None,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.modified_content
            .as_deref()
            .is_some_and(|modified| modified != self.original_content)
    }

    /// Unified diff between the original and modified text
    pub fn diff(&self, colorize: bool) -> Option<String> {
        let modified = self.modified_content.as_deref()?;
        Some(unified_diff(
            &self.original_content,
            modified,
            &self.file,
            colorize,
        ))
    }

    /// Write the modified text back to `file`; returns whether anything was written
    pub fn write(&self) -> Result<bool> {
        if !self.is_changed() {
            return Ok(false);
        }
        let Some(modified) = self.modified_content.as_deref() else {
            return Ok(false);
        };
        fs::write(&self.file, modified).map_err(|e| ZooError::io_error(&self.file, e))?;
        tracing::info!(
            "Applied {} fix(es) to {}",
            self.applied_count,
            self.file.display()
        );
        Ok(true)
    }
}

/// Render a unified diff with three lines of context
pub fn unified_diff(original: &str, modified: &str, file_path: &Path, colorize: bool) -> String {
    let console = Console::with_colors(colorize);
    let diff = TextDiff::from_lines(original, modified);
    let mut lines = vec![
        console.colorize(&format!("--- {}", file_path.display()), Color::Bold),
        console.colorize(&format!("+++ {} (fixed)", file_path.display()), Color::Bold),
    ];

    for group in diff.grouped_ops(3) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let hunk = format!(
            "@@ -{},{} +{},{} @@",
            old_start + 1,
            last.old_range().end - old_start,
            new_start + 1,
            last.new_range().end - new_start
        );
        lines.push(console.colorize(&hunk, Color::Cyan));

        for change in group.iter().flat_map(|op| diff.iter_changes(op)) {
            let line = change.value().trim_end_matches(['\n', '\r']);
            lines.push(match change.tag() {
                ChangeTag::Delete => console.colorize(&format!("-{line}"), Color::Red),
                ChangeTag::Insert => console.colorize(&format!("+{line}"), Color::Green),
                ChangeTag::Equal => format!(" {line}"),
            });
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
