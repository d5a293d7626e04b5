//! Command implementations

use anyhow::{Context, bail};
use colored::Colorize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info};
use zoo_core::{
    ConfigLoader, DefaultDiagnosticCollector, DefaultFileDiscovery, Diagnostic,
    DiagnosticCollector, Document, FileDiscovery, FilesConfiguration, FixResult, ResultExt,
    Severity, ZooConfig, ZooError,
};
use zoo_rules::{BuiltinRules, INCLUSIVE_TERMINOLOGY, RuleEngine, RuleMetadata};

use crate::OutputFormat;
use crate::output::{LintSummary, OutputFormatter};

/// Arguments of `zoo lint`, resolved from the command line
pub struct LintOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub write: bool,
    pub dry_run: bool,
    pub min_severity: Severity,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub error_on_warnings: bool,
    pub config_path: Option<PathBuf>,
    pub use_colors: bool,
}

/// Lint command implementation
pub fn lint_command(options: LintOptions) -> anyhow::Result<ExitCode> {
    debug!("Running lint command on paths: {:?}", options.paths);

    let mut config = load_config(options.config_path.as_deref(), options.paths.first())?;
    if !options.include.is_empty() {
        config.files.include = options.include.clone();
    }
    if !options.exclude.is_empty() {
        config.files.exclude = options.exclude.clone();
    }
    let engine = RuleEngine::from_config(&config).context("Invalid configuration")?;

    let start_time = Instant::now();
    let files = discover_files(&options.paths, &config.files)?;
    let (mut documents, unreadable) = read_documents(&files)?;
    let mut analyses = engine.analyze_all(&documents);

    let mut summary = LintSummary::new();
    summary.files_checked = documents.len();
    summary.files_unreadable = unreadable;

    let mut diffs = Vec::new();
    if options.write || options.dry_run {
        let fixes: Vec<FixResult> = documents
            .par_iter()
            .zip(&analyses)
            .map(|(document, analysis)| {
                let reported = reported(&analysis.diagnostics, options.min_severity);
                engine.fix(document, &reported)
            })
            .collect();

        for (index, fix) in fixes.iter().enumerate() {
            if !fix.is_changed() {
                continue;
            }
            if options.dry_run {
                summary.fixes_available += fix.applied_count;
                if let Some(diff) = fix.diff(options.use_colors) {
                    diffs.push(diff);
                }
                continue;
            }

            if !write_fix(fix)? {
                summary.fixes_failed += 1;
                continue;
            }
            summary.fixes_applied += fix.applied_count;

            // report what is left in the rewritten file
            if let Some(modified) = fix.modified_content.as_deref() {
                documents[index] = Document::parse(&fix.file, modified);
                analyses[index] = engine.analyze(&documents[index]);
            }
        }
        if summary.fixes_applied > 0 {
            info!("Applied {} fix(es)", summary.fixes_applied);
        }
    }

    let mut collector = DefaultDiagnosticCollector::new();
    for analysis in analyses {
        summary.units_skipped += analysis.skipped;
        collector.collect_all(analysis.diagnostics);
    }
    collector.retain_min_severity(options.min_severity);
    collector.sort_by_location();
    let diagnostics = collector.into_diagnostics();
    summary.count(&diagnostics);

    debug!(
        "Linted {} file(s) in {:.2?}",
        summary.files_checked,
        start_time.elapsed()
    );

    let formatter = OutputFormatter::new(options.format, options.use_colors);
    formatter.print_results(&diagnostics, &documents, &diffs, &summary)?;

    let failed = summary.has_errors()
        || summary.fixes_failed > 0
        || (options.error_on_warnings && summary.warnings > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Explicit `--config`, or the nearest config file above the first path
fn load_config(config_path: Option<&Path>, first_path: Option<&PathBuf>) -> anyhow::Result<ZooConfig> {
    let start_dir = first_path.map(|path| search_root(path));
    let config = ConfigLoader::load(config_path, start_dir.as_deref())?;
    debug!("Loaded configuration with {} rule override(s)", config.rules.len());
    Ok(config)
}

/// Directory a path is discovered from: itself, or the parent of a file
fn search_root(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn discover_files(paths: &[PathBuf], files: &FilesConfiguration) -> anyhow::Result<Vec<PathBuf>> {
    let mut discovered = Vec::new();
    for path in paths {
        let discovery = DefaultFileDiscovery::new(search_root(path), files)?;
        discovered.extend(discovery.discover_files(std::slice::from_ref(path))?);
    }
    discovered.sort();
    discovered.dedup();
    Ok(discovered)
}

/// Parse every readable file; unreadable files are logged and counted
fn read_documents(files: &[PathBuf]) -> anyhow::Result<(Vec<Document>, usize)> {
    let results = files
        .par_iter()
        .map(|path| {
            fs::read_to_string(path)
                .map(|text| Document::parse(path, text))
                .map_err(|e| ZooError::io_error(path, e))
                .skip_recoverable()
        })
        .collect::<zoo_core::Result<Vec<_>>>()?;

    let total = results.len();
    let documents: Vec<Document> = results.into_iter().flatten().collect();
    let unreadable = total - documents.len();
    Ok((documents, unreadable))
}

/// Write one file's fixes; returns false when the file could not be written
///
/// An unwritable file is logged and left with its original diagnostics so the
/// other files still get fixed and reported.
fn write_fix(fix: &FixResult) -> anyhow::Result<bool> {
    let written = fix
        .write()
        .skip_recoverable()
        .with_context(|| format!("Failed to write fixes to {}", fix.file.display()))?;
    if written.is_none() {
        error!("Fix error in {}: file left unchanged", fix.file.display());
        return Ok(false);
    }
    Ok(true)
}

fn reported(diagnostics: &[Diagnostic], min_severity: Severity) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.severity >= min_severity)
        .cloned()
        .collect()
}

/// Rules list command implementation
pub fn rules_list_command(detailed: bool, config_path: Option<&Path>) -> anyhow::Result<()> {
    let engine = engine_for_rules(config_path)?;
    let rules = engine.rules();

    println!("{}", "Available Rules:".bold());
    println!("{}", "================".bold());
    println!();

    for rule in &rules {
        if detailed {
            print_rule_details(rule, &engine);
            println!();
        } else {
            println!("  {} - {}", rule.id.cyan(), rule.title);
        }
    }

    if !detailed {
        println!();
    }
    println!("Total: {} rules", rules.len());
    Ok(())
}

/// Rules explain command implementation
pub fn rules_explain_command(rule_id: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let Some(rule) = BuiltinRules::get(rule_id) else {
        bail!("Rule '{rule_id}' not found. Run 'zoo rules' to list the available rules.");
    };
    let engine = engine_for_rules(config_path)?;

    let heading = format!("Rule: {}", rule.id);
    println!("{}", heading.bold());
    println!("{}", "=".repeat(heading.len()));
    println!();
    print_rule_details(&rule, &engine);

    if rule.id == INCLUSIVE_TERMINOLOGY {
        println!();
        println!("{}", "Terms:".bold());
        for entry in engine.terms().entries() {
            println!("  {} -> {}", entry.term.yellow(), entry.suggestion);
        }
    }
    Ok(())
}

fn engine_for_rules(config_path: Option<&Path>) -> anyhow::Result<RuleEngine> {
    let config = ConfigLoader::load(config_path, None)?;
    Ok(RuleEngine::from_config(&config)?)
}

fn print_rule_details(rule: &RuleMetadata, engine: &RuleEngine) {
    let severity = match engine.severity_of(rule.id) {
        Some(severity) => severity.to_string(),
        None => "off".to_string(),
    };

    println!("{} {}", rule.id.cyan().bold(), rule.title);
    println!("  Category: {}", rule.group());
    println!("  Default severity: {}", rule.default_severity);
    println!("  Severity: {severity}");
    println!("  Autofix: {}", if rule.fixable { "yes" } else { "no" });
    println!("  Description: {}", rule.description);
    println!("  Help: {}", rule.help_url);
}

/// Version command implementation
pub fn version_command(detailed: bool) {
    if detailed {
        println!("zoo {}", zoo_core::VERSION);
        println!("Build information:");
        println!("  Target: {}", std::env::consts::ARCH);
        println!("  OS: {}", std::env::consts::OS);
        println!("  Rules: {}", BuiltinRules::ids().len());
    } else {
        println!("zoo {}", zoo_core::VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_search_root() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("Lion.cs");
        fs::write(&file, "class Lion {}").expect("write");

        assert_eq!(search_root(dir.path()), dir.path());
        assert_eq!(search_root(&file), dir.path());
        assert_eq!(search_root(Path::new("Lion.cs")), PathBuf::from("."));
    }

    #[test]
    fn test_read_documents_skips_unreadable_files() {
        let dir = TempDir::new().expect("tempdir");
        let good = dir.path().join("Lion.cs");
        fs::write(&good, "class Lion {}").expect("write");
        let missing = dir.path().join("Missing.cs");

        let (documents, unreadable) = read_documents(&[good.clone(), missing]).expect("read");
        assert_eq!(unreadable, 1);
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].path(), good.as_path());
    }

    #[test]
    fn test_write_fix_keeps_going_on_unwritable_file() {
        let dir = TempDir::new().expect("tempdir");
        let fix = |file: PathBuf| FixResult {
            file,
            applied_count: 1,
            original_content: "namespace Zoo;\nclass Lion {}\n".to_string(),
            modified_content: Some("namespace Zoo;\n\nclass Lion {}\n".to_string()),
        };

        let unwritable = fix(dir.path().join("missing/Lion.cs"));
        assert!(!write_fix(&unwritable).expect("recoverable"));

        let writable = fix(dir.path().join("Lion.cs"));
        assert!(write_fix(&writable).expect("written"));
        assert_eq!(
            fs::read_to_string(dir.path().join("Lion.cs")).expect("read"),
            "namespace Zoo;\n\nclass Lion {}\n"
        );
    }

    #[test]
    fn test_discover_files_respects_excludes() {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("obj")).expect("mkdir");
        fs::write(dir.path().join("Lion.cs"), "class Lion {}").expect("write");
        fs::write(dir.path().join("obj/Gen.cs"), "class Gen {}").expect("write");
        fs::write(dir.path().join("notes.txt"), "text").expect("write");

        let files = discover_files(&[dir.path().to_path_buf()], &FilesConfiguration::default())
            .expect("discover");
        assert_eq!(files, vec![dir.path().join("Lion.cs")]);
    }
}
