//! Integration tests for the zoo CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const CLEAN_SOURCE: &str = "namespace Zoo;\n\npublic class Lion\n{\n    public void Roar() { }\n}\n";

const LAYOUT_VIOLATION: &str = "namespace Zoo;\npublic class Lion\n{\n}\n";

const TERMINOLOGY_VIOLATION: &str =
    "namespace Zoo;\n\npublic class Gate\n{\n    private string[] _whitelist = [];\n}\n";

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("zoo").unwrap()
}

fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    temp_dir
}

fn lint(dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("lint").arg(dir).arg("--no-color");
    cmd
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "zoo checks C# sources for non-inclusive terminology",
        ))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_version_detailed() {
    cli()
        .args(["version", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("zoo {VERSION}")))
        .stdout(predicate::str::contains("Build information:"));
}

#[test]
fn test_lint_clean_project() {
    let project = create_project(&[("src/Lion.cs", CLEAN_SOURCE)]);

    lint(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked: 1"))
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_reports_violations_in_compact_format() {
    let project = create_project(&[
        ("Lion.cs", LAYOUT_VIOLATION),
        ("Gate.cs", TERMINOLOGY_VIOLATION),
    ]);

    lint(project.path())
        .args(["--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Lion.cs:1:1: warning[style/file-scoped-namespace-empty-line]: \
             File-scoped namespace 'Zoo' should be followed by an empty line",
        ))
        .stdout(predicate::str::contains(
            "Gate.cs:5:22: warning[style/inclusive-terminology]: \
             '_whitelist' contains non-inclusive terminology; consider using: allow list, access list, permit",
        ))
        .stdout(predicate::str::contains(
            "zoo: 2 files, 2 issues (0 errors, 2 warnings)",
        ));
}

#[test]
fn test_lint_excludes_build_output() {
    let project = create_project(&[
        ("Lion.cs", CLEAN_SOURCE),
        ("obj/Debug/Generated.cs", LAYOUT_VIOLATION),
        ("README.md", "# whitelist"),
    ]);

    lint(project.path())
        .args(["--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zoo: 1 files checked, no issues"));
}

#[test]
fn test_error_on_warnings_fails() {
    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION)]);

    lint(project.path())
        .arg("--error-on-warnings")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Warnings: 1"));
}

#[test]
fn test_config_severity_override() {
    let project = create_project(&[
        ("Gate.cs", TERMINOLOGY_VIOLATION),
        (
            ".zoorc.toml",
            "[rules]\n\"style/inclusive-terminology\" = \"error\"\n",
        ),
    ]);

    lint(project.path())
        .args(["--format", "compact"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "error[style/inclusive-terminology]",
        ));
}

#[test]
fn test_config_can_turn_rules_off() {
    let project = create_project(&[
        ("Lion.cs", LAYOUT_VIOLATION),
        (
            ".zoorc.json",
            r#"{ "rules": { "style/file-scoped-namespace-empty-line": "off" } }"#,
        ),
    ]);

    lint(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_config_custom_terms() {
    let project = create_project(&[
        ("Keeper.cs", "namespace Zoo;\n\nclass Keeper { void FeedVisitor() { } }\n"),
        (
            ".zoorc.toml",
            "[[terminology.terms]]\nterm = \"visitor\"\nsuggestion = \"guest\"\n",
        ),
    ]);

    lint(project.path())
        .args(["--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "'FeedVisitor' contains non-inclusive terminology; consider using: guest",
        ));
}

#[test]
fn test_unknown_rule_in_config_fails() {
    let project = create_project(&[
        ("Lion.cs", CLEAN_SOURCE),
        (".zoorc.toml", "[rules]\n\"style/made-up\" = \"error\"\n"),
    ]);

    lint(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule 'style/made-up'"));
}

#[test]
fn test_min_severity_filters_diagnostics() {
    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION)]);

    lint(project.path())
        .args(["--min-severity", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_write_applies_fixes() {
    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION)]);
    let file = project.path().join("Lion.cs");

    lint(project.path())
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixes applied: 1"))
        .stdout(predicate::str::contains("No issues found"));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "namespace Zoo;\n\npublic class Lion\n{\n}\n"
    );
}

#[test]
fn test_write_preserves_crlf() {
    let source = LAYOUT_VIOLATION.replace('\n', "\r\n");
    let project = create_project(&[("Lion.cs", source.as_str())]);
    let file = project.path().join("Lion.cs");

    lint(project.path()).arg("--write").assert().success();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "namespace Zoo;\r\n\r\npublic class Lion\r\n{\r\n}\r\n"
    );
}

#[cfg(unix)]
#[test]
fn test_write_continues_past_unwritable_file() {
    use std::os::unix::fs::PermissionsExt;

    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION), ("Tiger.cs", LAYOUT_VIOLATION)]);
    let lion = project.path().join("Lion.cs");
    let tiger = project.path().join("Tiger.cs");
    fs::set_permissions(&tiger, fs::Permissions::from_mode(0o444)).unwrap();
    if fs::OpenOptions::new().write(true).open(&tiger).is_ok() {
        // permissions are not enforced for this user
        return;
    }

    lint(project.path())
        .arg("--write")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Fixes applied: 1"))
        .stdout(predicate::str::contains("Fixes failed: 1"))
        .stdout(predicate::str::contains("Tiger.cs:1:"));

    assert_eq!(
        fs::read_to_string(&lion).unwrap(),
        "namespace Zoo;\n\npublic class Lion\n{\n}\n"
    );
    assert_eq!(fs::read_to_string(&tiger).unwrap(), LAYOUT_VIOLATION);
}

#[test]
fn test_dry_run_shows_diff_without_writing() {
    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION)]);
    let file = project.path().join("Lion.cs");

    lint(project.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("(fixed)"))
        .stdout(predicate::str::contains(" namespace Zoo;\n+\n public class Lion"))
        .stdout(predicate::str::contains("Fixes available: 1"));

    assert_eq!(fs::read_to_string(&file).unwrap(), LAYOUT_VIOLATION);
}

#[test]
fn test_write_conflicts_with_dry_run() {
    let project = create_project(&[("Lion.cs", LAYOUT_VIOLATION)]);

    lint(project.path())
        .args(["--write", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_json_output() {
    let project = create_project(&[("Gate.cs", TERMINOLOGY_VIOLATION)]);

    let output = lint(project.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files_checked"], 1);
    assert_eq!(json["summary"]["warnings"], 1);
    assert_eq!(json["summary"]["errors"], 0);
    assert_eq!(json["issues"][0]["rule_id"], "style/inclusive-terminology");
    assert_eq!(json["issues"][0]["location"]["line"], 5);
}

#[test]
fn test_lint_single_file() {
    let project = create_project(&[
        ("Lion.cs", LAYOUT_VIOLATION),
        ("Gate.cs", TERMINOLOGY_VIOLATION),
    ]);

    lint(&project.path().join("Lion.cs"))
        .args(["--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("style/file-scoped-namespace-empty-line"))
        .stdout(predicate::str::contains("inclusive-terminology").not());
}

#[test]
fn test_missing_path_fails() {
    let project = create_project(&[]);

    lint(&project.path().join("Missing.cs"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing.cs"));
}

#[test]
fn test_rules_list() {
    cli()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Rules:"))
        .stdout(predicate::str::contains(
            "style/file-scoped-namespace-empty-line",
        ))
        .stdout(predicate::str::contains("style/inclusive-terminology"))
        .stdout(predicate::str::contains("Total: 2 rules"));
}

#[test]
fn test_rules_list_detailed_shows_effective_severity() {
    let project = create_project(&[(
        ".zoorc.toml",
        "[rules]\n\"style/inclusive-terminology\" = \"off\"\n",
    )]);

    cli()
        .args(["rules", "--detailed", "--config"])
        .arg(project.path().join(".zoorc.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Severity: off"))
        .stdout(predicate::str::contains("Autofix: yes"));
}

#[test]
fn test_rules_explain() {
    cli()
        .args(["rules", "explain", "style/inclusive-terminology"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rule: style/inclusive-terminology",
        ))
        .stdout(predicate::str::contains("Terms:"))
        .stdout(predicate::str::contains(
            "whitelist -> allow list, access list, permit",
        ));
}

#[test]
fn test_rules_explain_unknown_rule() {
    cli()
        .args(["rules", "explain", "style/made-up"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Rule 'style/made-up' not found"));
}

#[test]
fn test_generate_completion() {
    cli()
        .args(["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zoo"));
}
