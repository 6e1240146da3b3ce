use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the game reads and records the best score across runs
pub(crate) trait HighScoreStore {
    /// Fetch the stored high score.  `Ok(None)` means nothing has been
    /// recorded yet.
    fn read_high_score(&mut self) -> Result<Option<u32>, LoadError>;

    /// Record a new high score
    fn write_high_score(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score kept in a small JSON file on disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    /// `None` when saving is disabled
    path: Option<PathBuf>,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path: Some(path) }
    }

    /// A store that never touches the disk: reads find nothing and writes
    /// are discarded.
    pub(crate) fn disabled() -> HighScoreFile {
        HighScoreFile { path: None }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscore.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl HighScoreStore for HighScoreFile {
    fn read_high_score(&mut self) -> Result<Option<u32>, LoadError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        let record =
            serde_json::from_slice::<HighScoreRecord>(&src).map_err(LoadError::deserialize)?;
        Ok(Some(record.high_score))
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let record = HighScoreRecord { high_score: score };
        let mut src = serde_json::to_string(&record).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
