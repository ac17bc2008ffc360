// src/config/mod.rs
pub mod types;

pub use self::types::{CodematchToml, Config, ScoringConfig};
use crate::error::{CodematchError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "codematch.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from `codematch.toml` in the working directory,
    /// falling back to defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::new();
        config.load_file(Path::new(CONFIG_FILE), false)?;
        Ok(config)
    }

    /// Loads settings from an explicit path. A missing file is an error
    /// when `required` is set and silently ignored otherwise.
    ///
    /// # Errors
    /// Returns error if reading or parsing fails.
    pub fn load_file(&mut self, path: &Path, required: bool) -> Result<()> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(());
            }
            Err(source) => {
                return Err(CodematchError::Io {
                    source,
                    path: path.to_path_buf(),
                })
            }
        };
        self.parse_toml(&content)
            .map_err(|source| CodematchError::Config {
                source,
                path: path.to_path_buf(),
            })
    }

    /// Replaces the scoring section with the parsed content.
    ///
    /// # Errors
    /// Returns the TOML error if the content is malformed.
    pub fn parse_toml(&mut self, content: &str) -> std::result::Result<(), toml::de::Error> {
        let parsed: CodematchToml = toml::from_str(content)?;
        self.scoring = parsed.scoring;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Grammar;

    #[test]
    fn test_missing_keys_use_defaults() {
        let mut config = Config::new();
        config
            .parse_toml("[scoring]\ngrammar = \"rust\"\n")
            .unwrap();
        assert_eq!(config.scoring.grammar, Grammar::Rust);
        assert_eq!(config.scoring.max_tree_nodes, 200_000);
        assert!(config.scoring.autojunk);
    }

    #[test]
    fn test_empty_file_is_default() {
        let mut config = Config::new();
        config.parse_toml("").unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_malformed_is_error() {
        let mut config = Config::new();
        assert!(config.parse_toml("[scoring]\nmax_lcs_cells = \"lots\"").is_err());
    }

    #[test]
    fn test_missing_optional_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        assert!(config.load_file(&dir.path().join("none.toml"), false).is_ok());
        assert!(config.load_file(&dir.path().join("none.toml"), true).is_err());
    }
}
