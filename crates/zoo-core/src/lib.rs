//! Zoo Core
//!
//! Host layer for the zoo C# style checker: a lossless syntax tree, a
//! declaration-level symbol table, documents and fix results, diagnostics,
//! configuration and file discovery.

pub mod autofix;
pub mod config;
pub mod console; // Terminal console utilities for rich output
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod discovery;
pub mod document;
pub mod error;
pub mod result;
pub mod semantic;

// Re-export commonly used types
pub use autofix::{FixResult, unified_diff};
pub use config::{
    ConfigLoader, FilesConfiguration, RuleSeverity, TermConfiguration, TerminologyConfiguration,
    ZooConfig,
};
pub use console::{Color, Console};
pub use diagnostics::{
    Applicability, CodeSuggestion, DefaultDiagnosticCollector, Diagnostic, DiagnosticCategory,
    DiagnosticCollector, DiagnosticRenderer, Location, OutputFormat, Severity, SourceMap,
    format_message,
};
pub use discovery::{DefaultFileDiscovery, FileDiscovery};
pub use document::Document;
pub use error::{ErrorKind, ZooError};
pub use result::{Result, ResultExt};
pub use semantic::{Symbol, SymbolKind, SymbolTable};

/// Initialize tracing with `default_filter` unless `RUST_LOG` is set
///
/// Setting `ZOO_LOG_FORMAT=json` switches the output to JSON lines. Calling
/// this more than once keeps the first subscriber.
pub fn init_tracing_with_filter(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let json = std::env::var("ZOO_LOG_FORMAT").is_ok_and(|format| format == "json");

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
