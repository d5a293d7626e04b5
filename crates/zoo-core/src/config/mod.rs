//! Configuration system for zoo
//!
//! ## Configuration Files
//!
//! - `.zoorc.toml` (preferred)
//! - `.zoorc.json`
//!
//! When no explicit path is given, the loader searches from the first lint
//! path upward until a config is found or the filesystem root is reached.
//! Without a config file the defaults apply.
//!
//! ## Example Configuration
//!
//! ```toml
//! [files]
//! include = ["**/*.cs"]
//! exclude = ["**/bin/**", "**/obj/**"]
//!
//! [rules]
//! "style/inclusive-terminology" = "warn"
//! "style/file-scoped-namespace-empty-line" = "error"
//!
//! [[terminology.terms]]
//! term = "master"
//! suggestion = "primary, main"
//! ```

pub mod loader;
pub mod zoo_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use zoo_config::{
    FilesConfiguration, RuleSeverity, TermConfiguration, TerminologyConfiguration, ZooConfig,
};
