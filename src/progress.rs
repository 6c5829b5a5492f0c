/// Persisted player progress: unlocked level and accumulated money.
///
/// Reads never fail.  Missing files, missing keys and malformed content all
/// fall back to defaults (`unlocked_level = 1`, `currency = 0`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::ProgressState;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to write progress to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Anything that can hold `ProgressState` between attempts.
pub trait ProgressStore {
    fn load(&self) -> ProgressState;
    fn save(&mut self, progress: &ProgressState) -> Result<(), ProgressError>;
}

// ── On-disk format ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct ProgressFile {
    unlocked_level: i64,
    currency: f64,
}

impl Default for ProgressFile {
    fn default() -> Self {
        let defaults = ProgressState::default();
        Self {
            unlocked_level: i64::from(defaults.unlocked_level),
            currency: defaults.currency,
        }
    }
}

impl From<ProgressFile> for ProgressState {
    fn from(file: ProgressFile) -> Self {
        Self {
            unlocked_level: file.unlocked_level.clamp(1, i64::from(u32::MAX)) as u32,
            currency: if file.currency.is_finite() {
                file.currency.max(0.0)
            } else {
                0.0
            },
        }
    }
}

/// Parse progress from TOML text, substituting defaults for anything
/// missing or unreadable.
pub fn parse_progress(text: &str) -> ProgressState {
    match toml::from_str::<ProgressFile>(text) {
        Ok(file) => file.into(),
        Err(err) => {
            log::warn!("ignoring malformed progress data: {err}");
            ProgressState::default()
        }
    }
}

// ── File-backed store ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> ProgressState {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_progress(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => ProgressState::default(),
            Err(err) => {
                log::warn!("could not read progress from {:?}: {err}", self.path);
                ProgressState::default()
            }
        }
    }

    fn save(&mut self, progress: &ProgressState) -> Result<(), ProgressError> {
        let text = toml::to_string(&ProgressFile {
            unlocked_level: i64::from(progress.unlocked_level),
            currency: progress.currency,
        })?;
        fs::write(&self.path, text).map_err(|source| ProgressError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct MemoryProgressStore {
    pub progress: ProgressState,
    pub saves: u32,
}

impl MemoryProgressStore {
    pub fn new(progress: ProgressState) -> Self {
        Self { progress, saves: 0 }
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> ProgressState {
        self.progress.clone()
    }

    fn save(&mut self, progress: &ProgressState) -> Result<(), ProgressError> {
        self.progress = progress.clone();
        self.saves += 1;
        Ok(())
    }
}
