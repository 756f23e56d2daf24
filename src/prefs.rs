//! Persisted playback preferences.
//!
//! A single global record of three scalars, read once at startup and
//! overwritten on every relevant playback transition. Stored as TOML at
//! `$XDG_DATA_HOME/vivace/state.toml` (see `resolve_state_path`).

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::{StorageSettings, default_data_dir};

/// Where playback left off last time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPrefs {
    /// Index of the last active track in the display-name-sorted list.
    pub last_index: usize,
    /// Position within that track, in milliseconds.
    pub last_position_ms: u64,
    /// Whether playback was running when the record was written.
    pub was_playing: bool,
}

/// Reads and writes the preferences file.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved record; a missing or malformed file yields defaults.
    pub fn load(&self) -> PlaybackPrefs {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => PlaybackPrefs::default(),
        }
    }

    /// Replace the saved record wholesale.
    pub fn save(&self, prefs: &PlaybackPrefs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(prefs)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// Remove the saved record entirely.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolve the state file path: `VIVACE_STATE_PATH`, then the config
/// override, then the XDG default.
pub fn resolve_state_path(storage: &StorageSettings) -> Option<PathBuf> {
    if let Some(p) = env::var_os("VIVACE_STATE_PATH") {
        return Some(PathBuf::from(p));
    }
    if let Some(p) = &storage.state_path {
        return Some(p.clone());
    }
    default_data_dir().map(|d| d.join("state.toml"))
}

#[cfg(test)]
mod tests;
