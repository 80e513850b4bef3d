use crate::options::Options;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Options selected in the launcher at startup
    #[serde(default)]
    pub(crate) options: Options,

    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gamebox").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// File to append log messages to; nothing is logged if unset
    pub(crate) file: Option<PathBuf>,
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guess::Level;
    use crate::snake::SnakePreset;
    use tempfile::tempdir;

    #[test]
    fn load_full() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(
            &path,
            concat!(
                "[options]\n",
                "snake = \"hard\"\n",
                "guess = \"expert\"\n",
                "\n",
                "[logging]\n",
                "file = \"/tmp/gamebox.log\"\n",
                "level = \"debug\"\n",
            ),
        )
        .unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(
            cfg,
            Config {
                options: Options {
                    snake: SnakePreset::Hard,
                    guess: Level::Expert,
                },
                logging: LogConfig {
                    file: Some(PathBuf::from("/tmp/gamebox.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
    }

    #[test]
    fn load_partial() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[options]\nsnake = \"easy\"\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(cfg.options.snake, SnakePreset::Easy);
        assert_eq!(cfg.options.guess, Level::Medium);
        assert_eq!(cfg.logging, LogConfig::default());
    }

    #[test]
    fn load_empty() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "").unwrap();
        assert_eq!(Config::load(&path, false).unwrap(), Config::default());
    }

    #[test]
    fn missing_allowed() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
    }

    #[test]
    fn missing_not_allowed() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn unknown_preset() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[options]\nsnake = \"huge\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_log_level() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Parse(_))
        ));
    }
}
