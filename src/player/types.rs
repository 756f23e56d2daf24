//! Player-facing small types and handles.
//!
//! This module defines the intent and state enums exchanged between the UI,
//! the service handler and the audio engine, plus the shared position handle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A user or controller intent, forwarded to the engine by the handler.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Toggle between playing and paused.
    PlayPause,
    /// A row was chosen in the list. Choosing the current track toggles
    /// play/pause instead of restarting it.
    SelectedAudioChange(usize),
    /// Seek to an absolute position in the current track.
    SeekTo(Duration),
    /// Seek to a fraction (0..=1) of the current track's duration.
    UpdateProgress(f32),
    /// Rewind by the configured fixed increment.
    Backward,
    /// Skip ahead by the configured fixed increment.
    Forward,
    /// Jump to the next track.
    SeekToNext,
    /// Jump to the previous track.
    SeekToPrevious,
    /// Stop playback.
    Stop,
    /// Shut the player down.
    Quit,
}

/// The observable playback states, published as a discrete event stream.
///
/// Transient: never persisted directly, only distilled into the saved
/// playback preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioState {
    Initial,
    /// A track was prepared and its total duration is known.
    Ready { duration: Duration },
    /// Periodic position tick while playing.
    Progress { position: Duration },
    /// Position tick while the engine rebuilds its source (seeks).
    Buffering { position: Duration },
    /// The playing flag flipped.
    Playing { is_playing: bool },
    /// The current track index changed.
    CurrentPlaying { index: usize },
}

/// Low-level commands the engine thread accepts.
#[derive(Debug)]
pub(super) enum EngineCmd {
    PlayAt { index: usize, start_at: Duration },
    Pause,
    Resume,
    SeekTo(Duration),
    Stop,
    Quit,
}

/// Transitions the engine republishes for the handler to observe.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum EngineCallback {
    TrackChanged { index: usize, duration: Duration },
    PlayingChanged { is_playing: bool, position: Duration },
    Seeked { position: Duration },
    /// The sink was torn down: explicit stop, decode failure, or the end
    /// of the track list.
    Stopped,
}

#[derive(Debug, Clone)]
/// Runtime position information shared between engine, ticker and handler.
pub struct PositionInfo {
    /// Currently loaded track index (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
}

impl Default for PositionInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type PositionHandle = Arc<Mutex<PositionInfo>>;
