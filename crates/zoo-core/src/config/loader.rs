//! Configuration file discovery and loading

use super::zoo_config::ZooConfig;
use crate::error::ZooError;
use crate::result::Result;
use std::path::{Path, PathBuf};

/// Config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[".zoorc.toml", ".zoorc.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking upward from `start_path`
    ///
    /// `.zoorc.toml` wins over `.zoorc.json` in the same directory; the
    /// nearest directory wins overall.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let start = start_path
            .canonicalize()
            .map_err(|e| ZooError::io_error(start_path, e))?;
        let mut current = if start.is_file() {
            start.parent().map(Path::to_path_buf).unwrap_or(start)
        } else {
            start
        };

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<ZooConfig> {
        ZooConfig::load(path).map_err(|e| match e {
            ZooError::IoError { .. } => e,
            other => ZooError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                other
            )),
        })
    }

    /// Load the config at `custom_path`, or discover one from `start_dir`
    ///
    /// Without an explicit path and without a discovered file the defaults
    /// are used. An explicit path that does not exist is an error.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ZooConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ZooError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ZooConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn test_auto_discover_walks_upward() {
        let temp_dir = TempDir::new().expect("temp dir");
        let nested = temp_dir.path().join("src/Animals");
        fs::create_dir_all(&nested).expect("mkdir");
        create_temp_config(temp_dir.path(), ".zoorc.toml", "");

        let found = ConfigLoader::auto_discover(&nested).expect("discover");
        assert!(found.is_some_and(|p| p.ends_with(".zoorc.toml")));
    }

    #[test]
    fn test_auto_discover_from_file_path() {
        let temp_dir = TempDir::new().expect("temp dir");
        create_temp_config(temp_dir.path(), ".zoorc.json", "{}");
        let source = create_temp_config(temp_dir.path(), "Keeper.cs", "class Keeper {}");

        let found = ConfigLoader::auto_discover(&source).expect("discover");
        assert!(found.is_some_and(|p| p.ends_with(".zoorc.json")));
    }

    #[test]
    fn test_toml_preferred_over_json() {
        let temp_dir = TempDir::new().expect("temp dir");
        create_temp_config(temp_dir.path(), ".zoorc.json", "{}");
        create_temp_config(temp_dir.path(), ".zoorc.toml", "");

        let found = ConfigLoader::auto_discover(temp_dir.path()).expect("discover");
        assert!(found.is_some_and(|p| p.ends_with(".zoorc.toml")));
    }

    #[test]
    fn test_load_json_by_extension() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = create_temp_config(
            temp_dir.path(),
            ".zoorc.json",
            r#"{ "rules": { "style/inclusive-terminology": "off" } }"#,
        );

        let config = ConfigLoader::load(Some(&path), None).expect("load");
        assert_eq!(
            config.rule_severity("style/inclusive-terminology"),
            Some(RuleSeverity::Off)
        );
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = ConfigLoader::load(Some(Path::new("does/not/exist.toml")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reports_file_in_parse_errors() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = create_temp_config(temp_dir.path(), ".zoorc.toml", "[rules\n");

        let err = ConfigLoader::load_from_file(&path).expect_err("invalid toml");
        assert!(err.to_string().contains(".zoorc.toml"));
    }
}
