//! Optional TOML config file, reduced from `faxt::config::Config` to the
//! two fields this single-purpose driver actually takes defaults from.
//! CLI flags always win over a config value.

use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default output path, used when `-o` is not given.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Default verbosity, overridden by `-v`.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DriverError::Config(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content).map_err(|e| DriverError::Config(path.to_path_buf(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bc.toml");
        std::fs::write(&path, "").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_output_and_verbose() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bc.toml");
        std::fs::write(&path, "output = \"out.bif\"\nverbose = true\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("out.bif")));
        assert!(config.verbose);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/bc.toml"));
        assert!(result.is_err());
    }
}
