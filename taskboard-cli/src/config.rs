//! Layered settings for the CLI using Figment

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: figment::Error },

    /// Invalid configuration value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError { source: error }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Base name of the config files looked up in the working directory
pub const CONFIG_STEM: &str = "taskboard";

/// CLI settings after merging every source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Board file, relative to the working directory unless absolute
    pub board: PathBuf,
    /// tracing filter directive
    pub log: String,
    /// Default search query for `show`
    pub query: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: PathBuf::from("board.yaml"),
            log: "warn".to_string(),
            query: String::new(),
        }
    }
}

impl Settings {
    /// Load settings for a working directory.
    ///
    /// Sources in precedence order (later sources override earlier ones):
    /// 1. Defaults
    /// 2. `taskboard.yaml`, `taskboard.toml`, `taskboard.json` in `dir`
    /// 3. `TASKBOARD_*` environment variables
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let settings: Settings = Self::figment(dir).extract()?;
        settings.validate()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    fn figment(dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(dir.join(format!("{CONFIG_STEM}.yaml"))))
            .merge(Toml::file(dir.join(format!("{CONFIG_STEM}.toml"))))
            .merge(Json::file(dir.join(format!("{CONFIG_STEM}.json"))))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.board.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "board".into(),
                message: "board path must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_board(mut self, board: Option<PathBuf>) -> Self {
        if let Some(board) = board {
            self.board = board;
        }
        self
    }

    /// Board path resolved against `dir`
    pub fn board_path(&self, dir: &Path) -> PathBuf {
        if self.board.is_absolute() {
            self.board.clone()
        } else {
            dir.join(&self.board)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.board_path(temp.path()), temp.path().join("board.yaml"));
    }

    #[test]
    #[serial]
    fn test_yaml_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("taskboard.yaml"),
            "board: boards/main.yaml\nquery: login\n",
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.board, PathBuf::from("boards/main.yaml"));
        assert_eq!(settings.query, "login");
        assert_eq!(settings.log, "warn");
    }

    #[test]
    #[serial]
    fn test_toml_overrides_yaml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.yaml"), "log: info\n").unwrap();
        std::fs::write(temp.path().join("taskboard.toml"), "log = \"debug\"\n").unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.log, "debug");
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.json"), r#"{"query": "file"}"#).unwrap();

        env::set_var("TASKBOARD_QUERY", "env");
        let settings = Settings::load(temp.path());
        env::remove_var("TASKBOARD_QUERY");

        assert_eq!(settings.unwrap().query, "env");
    }

    #[test]
    #[serial]
    fn test_flag_overrides_everything() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.yaml"), "board: from-file.yaml\n").unwrap();
        let settings = Settings::load(temp.path())
            .unwrap()
            .with_board(Some(PathBuf::from("/tmp/flag.yaml")));
        assert_eq!(settings.board_path(temp.path()), PathBuf::from("/tmp/flag.yaml"));
    }

    #[test]
    #[serial]
    fn test_empty_board_path_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.yaml"), "board: ''\n").unwrap();
        assert!(matches!(
            Settings::load(temp.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.toml"), "log = [unclosed").unwrap();
        assert!(matches!(
            Settings::load(temp.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
