// src/core/config.rs

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::constants::{CONFIG_FILENAME, DEFAULT_PYTHON};
use crate::models::NotaryConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config.toml: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Loads `config.toml` from the registry directory, writing a default one
/// the first time.
pub fn load_config(notary_dir: &Path) -> Result<NotaryConfig, ConfigError> {
    let config_path = notary_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_config = NotaryConfig::default();
        fs::write(&config_path, toml::to_string_pretty(&default_config)?)?;
        log::debug!("Wrote default config to {}", config_path.display());
        return Ok(default_config);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(toml::from_str(&content)?)
}

impl NotaryConfig {
    /// The interpreter to use: the explicit one, the configured one, or `python`.
    pub fn python_or_default<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.python.as_deref())
            .unwrap_or(DEFAULT_PYTHON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, NotaryConfig::default());
        assert!(dir.path().join(CONFIG_FILENAME).is_file());
        // A second load reads the file back.
        assert_eq!(load_config(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_reads_user_values() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "python = \"python3.12\"\nshell = \"fish\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.python.as_deref(), Some("python3.12"));
        assert_eq!(config.shell.as_deref(), Some("fish"));
    }

    #[test]
    fn test_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "python = [").unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_python_precedence() {
        let config = NotaryConfig {
            python: Some("python3.10".to_string()),
            shell: None,
        };
        assert_eq!(config.python_or_default(Some("pypy3")), "pypy3");
        assert_eq!(config.python_or_default(None), "python3.10");
        assert_eq!(NotaryConfig::default().python_or_default(None), DEFAULT_PYTHON);
    }
}
