//! Configuration file support.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::AuthorId;
use crate::store::StoreOptions;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default data directory
    pub dir: Option<PathBuf>,

    /// Default author for changes
    pub author: Option<String>,

    /// Editor command for editing notes
    pub editor: Option<String>,

    /// How long to wait for a competing writer, in milliseconds
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notegraph/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notegraph")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. `notegraph` under the platform data directory
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("notegraph")
            })
    }

    /// Resolve the author recorded on changes.
    ///
    /// Precedence order:
    /// 1. CLI `--author` argument
    /// 2. Config file `author` setting
    /// 3. $USER environment variable
    pub fn author(&self, cli_author: Option<&str>) -> Result<AuthorId> {
        let raw = cli_author
            .map(str::to_string)
            .or_else(|| self.author.clone())
            .or_else(|| std::env::var("USER").ok())
            .ok_or_else(|| anyhow!("no author set; pass --author or set `author` in config"))?;

        AuthorId::new(&raw).with_context(|| "invalid author")
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Storage options derived from the config.
    pub fn store_options(&self) -> StoreOptions {
        let mut options = StoreOptions::default();
        if let Some(ms) = self.busy_timeout_ms {
            options.busy_timeout = Duration::from_millis(ms);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
    }

    #[test]
    fn data_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(config.data_dir(Some(&cli_dir)), PathBuf::from("/cli/notes"));
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn data_dir_default_is_namespaced() {
        let config = Config::default();
        assert!(config.data_dir(None).ends_with("notegraph"));
    }

    #[test]
    fn author_prefers_cli_then_config() {
        let config = Config {
            author: Some("config-user".to_string()),
            ..Config::default()
        };
        assert_eq!(config.author(Some("flag-user")).unwrap().as_str(), "flag-user");
        assert_eq!(config.author(None).unwrap().as_str(), "config-user");
    }

    #[test]
    fn blank_author_is_rejected() {
        let config = Config::default();
        assert!(config.author(Some("   ")).is_err());
    }

    #[test]
    fn busy_timeout_maps_to_store_options() {
        let config = Config {
            busy_timeout_ms: Some(250),
            ..Config::default()
        };
        assert_eq!(config.store_options().busy_timeout, Duration::from_millis(250));
        assert_eq!(Config::default().store_options(), StoreOptions::default());
    }

    #[test]
    fn load_from_parses_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "dir = \"/srv/notes\"\nauthor = \"alice\"\nbusy_timeout_ms = 100\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/srv/notes")));
        assert_eq!(config.author.as_deref(), Some("alice"));
        assert_eq!(config.busy_timeout_ms, Some(100));
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.author.is_none());
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dir = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("notegraph/config.toml"));
    }
}
