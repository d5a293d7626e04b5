//! Zoo CLI
//!
//! Command-line interface for the zoo C# style checker

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use zoo_core::init_tracing_with_filter;

#[derive(Parser)]
#[command(name = "zoo")]
#[command(about = "zoo: a C# style checker for inclusive terminology and namespace layout")]
#[command(version = zoo_core::VERSION)]
#[command(
    long_about = "zoo checks C# sources for non-inclusive terminology in symbol names and\n\
documentation comments, and for file-scoped namespaces that are not followed by an empty line.\n\
\n\
Examples:\n  \
zoo lint                         # Lint the current directory\n  \
zoo lint --write src/            # Lint and fix files in src/\n  \
zoo lint --dry-run Program.cs    # Show the fixes as a diff\n  \
zoo rules --detailed             # List all rules with their settings\n  \
zoo rules explain style/inclusive-terminology"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.zoorc.toml/.zoorc.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint C# files for non-inclusive terminology and namespace layout
    #[command(alias = "check")]
    Lint {
        /// Files or directories to lint
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(
            short,
            long,
            default_value = "human",
            help = "Output format for diagnostics"
        )]
        format: OutputFormat,

        /// Write fixes to files
        #[arg(long, help = "Write fixes to files")]
        write: bool,

        /// Show fixes without applying them
        #[arg(
            long,
            help = "Show proposed fixes without applying them (dry run)",
            conflicts_with = "write"
        )]
        dry_run: bool,

        /// Minimum severity level to report
        #[arg(
            long,
            default_value = "info",
            help = "Minimum severity level to report"
        )]
        min_severity: Severity,

        /// Include patterns (glob syntax)
        #[arg(
            long,
            help = "Include files matching pattern (can be used multiple times)"
        )]
        include: Vec<String>,

        /// Exclude patterns (glob syntax)
        #[arg(
            long,
            help = "Exclude files matching pattern (can be used multiple times)"
        )]
        exclude: Vec<String>,

        /// Treat warnings as failures for the exit code
        #[arg(long, help = "Exit with non-zero code when warnings are reported")]
        error_on_warnings: bool,
    },

    /// Show rule information
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,

        /// Show detailed rule information
        #[arg(long, help = "Show detailed information for each rule")]
        detailed: bool,
    },

    /// Show version information
    Version {
        /// Show detailed build information
        #[arg(long)]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List all available rules
    List,
    /// Explain a specific rule
    Explain {
        /// Rule id, e.g. style/inclusive-terminology
        rule_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with code frames
    Human,
    /// JSON document with diagnostics and a summary
    Json,
    /// One line per diagnostic
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl From<Severity> for zoo_core::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => zoo_core::Severity::Info,
            Severity::Warning => zoo_core::Severity::Warning,
            Severity::Error => zoo_core::Severity::Error,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return ExitCode::SUCCESS;
    }

    let use_colors =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
    colored::control::set_override(use_colors);

    // RUST_LOG still wins over these
    let log_filter = match cli.verbose {
        0 => "zoo=warn",
        1 => "zoo=info",
        2 => "zoo=debug",
        _ => "zoo=trace",
    };
    init_tracing_with_filter(log_filter);

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        return ExitCode::from(2);
    }

    match run_command(cli, use_colors) {
        Ok(code) => code,
        Err(e) => {
            error!("zoo failed: {:#}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli, use_colors: bool) -> anyhow::Result<ExitCode> {
    match cli.command {
        Some(Commands::Lint {
            paths,
            format,
            write,
            dry_run,
            min_severity,
            include,
            exclude,
            error_on_warnings,
        }) => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };
            commands::lint_command(commands::LintOptions {
                paths,
                format,
                write,
                dry_run,
                min_severity: min_severity.into(),
                include,
                exclude,
                error_on_warnings,
                config_path: cli.config,
                use_colors,
            })
        }

        Some(Commands::Rules { action, detailed }) => {
            match action {
                Some(RulesAction::List) | None => {
                    commands::rules_list_command(detailed, cli.config.as_deref())?
                }
                Some(RulesAction::Explain { rule_id }) => {
                    commands::rules_explain_command(&rule_id, cli.config.as_deref())?
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Some(Commands::Version { detailed }) => {
            commands::version_command(detailed);
            Ok(ExitCode::SUCCESS)
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
