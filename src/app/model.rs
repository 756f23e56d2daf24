//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct holds the current library, selection and the playback
//! snapshot distilled from the `AudioState` event stream.

use std::time::Duration;

use crate::library::Audio;
use crate::player::AudioState;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub audios: Vec<Audio>,
    pub selected: usize,

    /// Index of the track the engine currently holds, if any.
    pub now_playing: Option<usize>,
    pub is_playing: bool,
    /// Set once the first `Ready` event arrived.
    pub ready: bool,
    pub duration: Option<Duration>,
    pub position: Duration,
    /// Set while the engine rebuilds its source around a seek.
    pub buffering: bool,

    pub follow_playback: bool,
}

impl App {
    /// Create a new `App` with the provided list of `audios`.
    pub fn new(audios: Vec<Audio>) -> Self {
        Self {
            audios,
            selected: 0,
            now_playing: None,
            is_playing: false,
            ready: false,
            duration: None,
            position: Duration::ZERO,
            buffering: false,
            follow_playback: true,
        }
    }

    /// Fold one event from the playback state stream into the model.
    pub fn apply_state(&mut self, state: AudioState) {
        match state {
            AudioState::Initial => {
                self.now_playing = None;
                self.is_playing = false;
                self.ready = false;
                self.duration = None;
                self.position = Duration::ZERO;
                self.buffering = false;
            }
            AudioState::Ready { duration } => {
                self.ready = true;
                self.duration = Some(duration);
            }
            AudioState::Progress { position } => {
                self.position = position;
                self.buffering = false;
            }
            AudioState::Buffering { position } => {
                self.position = position;
                self.buffering = true;
            }
            AudioState::Playing { is_playing } => {
                self.is_playing = is_playing;
            }
            AudioState::CurrentPlaying { index } => {
                self.now_playing = Some(index);
                self.position = Duration::ZERO;
                if self.follow_playback {
                    self.set_selected(index);
                }
            }
        }
    }

    /// How far through the current track playback is, in `0.0..=1.0`.
    pub fn progress_fraction(&self) -> f32 {
        match self.duration {
            Some(total) if total > Duration::ZERO => {
                (self.position.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Playback state as seen by external controllers.
    pub fn playback_state(&self) -> PlaybackState {
        match self.now_playing {
            None => PlaybackState::Stopped,
            Some(_) if self.is_playing => PlaybackState::Playing,
            Some(_) => PlaybackState::Paused,
        }
    }

    /// The record for the track the engine holds, if any.
    pub fn now_playing_audio(&self) -> Option<&Audio> {
        self.now_playing.and_then(|i| self.audios.get(i))
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.audios.is_empty()
    }

    /// Set the selected row, clamped to the list bounds.
    pub fn set_selected(&mut self, idx: usize) {
        if self.audios.is_empty() {
            self.selected = 0;
        } else {
            self.selected = idx.min(self.audios.len() - 1);
        }
    }

    /// Move selection to the next row, wrapping at the end.
    pub fn next(&mut self) {
        if self.audios.is_empty() {
            return;
        }
        self.follow_playback = false;
        self.selected = (self.selected + 1) % self.audios.len();
    }

    /// Move selection to the previous row, wrapping at the start.
    pub fn prev(&mut self) {
        if self.audios.is_empty() {
            return;
        }
        self.follow_playback = false;
        self.selected = if self.selected == 0 {
            self.audios.len() - 1
        } else {
            self.selected - 1
        };
    }
}
