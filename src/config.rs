use crate::engine::SpeedUpPolicy;
use crate::highscore::HighScoreFile;
use log::{warn, LevelFilter};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Config {
    /// How the tick schedule reacts to the speed level going up
    #[serde(default)]
    pub(crate) speed_up: SpeedUpPolicy,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
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

    /// Return the store to use for the high score: the file given in the
    /// configuration or, if that is not set, the default high score file.
    ///
    /// If `self.files.save_high_score` is `false`, or if no path is configured
    /// and the default could not be computed, the returned store keeps
    /// nothing on disk.
    pub(crate) fn high_score_store(&self) -> HighScoreFile {
        if !self.files.save_high_score {
            return HighScoreFile::disabled();
        }
        match self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreFile::default_path)
        {
            Some(path) => HighScoreFile::new(path),
            None => {
                warn!(
                    "Failed to determine path to local data directory; high score will not be saved"
                );
                HighScoreFile::disabled()
            }
        }
    }

    /// Return the file that log messages should be written to, or `None` if
    /// logging is off or no path could be determined
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        if self.logging.level == LevelFilter::Off {
            return None;
        }
        self.files.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    save_high_score: bool,

    /// Path at which to write log messages
    log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_score_file: Option<String>,
    save_high_score: bool,
    log_file: Option<String>,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            high_score_file: value
                .high_score_file
                .map(expanduser::expanduser)
                .transpose()?,
            save_high_score: value.save_high_score,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LoggingConfig {
    /// The most verbose level of message to write
    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
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
