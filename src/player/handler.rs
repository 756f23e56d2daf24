//! The service handler: the shim between intents and the engine.
//!
//! Commands flow one way (UI/session intent -> handler -> engine command),
//! state flows the other (engine callback -> handler -> `AudioState`
//! stream). The handler also owns the progress ticker and distills
//! transitions into the persisted playback preferences.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::config::ControlsSettings;
use crate::prefs::{PlaybackPrefs, PrefsStore};

use super::ticker::ProgressTicker;
use super::types::{AudioState, EngineCallback, EngineCmd, PlayerEvent, PositionHandle};

/// What a list selection means for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SelectAction {
    /// The chosen row is the current track: toggle play/pause.
    Toggle,
    /// A different row: switch tracks.
    Switch,
}

pub(super) fn select_action(current: Option<usize>, chosen: usize) -> SelectAction {
    if current == Some(chosen) {
        SelectAction::Toggle
    } else {
        SelectAction::Switch
    }
}

/// Absolute offset for a seek expressed as a fraction of the total duration.
pub(super) fn fraction_position(total: Duration, fraction: f32) -> Duration {
    let f = fraction.clamp(0.0, 1.0) as f64;
    Duration::from_millis((total.as_millis() as f64 * f) as u64)
}

pub(super) struct Handler {
    cmd_tx: Sender<EngineCmd>,
    state_tx: Sender<AudioState>,
    ticker: ProgressTicker,
    prefs: PrefsStore,
    controls: ControlsSettings,
    position: PositionHandle,
    track_count: usize,

    /// Saved index/position from last run; seeds the first play of that
    /// track, then is consumed.
    resume: Option<PlaybackPrefs>,

    current_index: Option<usize>,
    duration: Option<Duration>,
    is_playing: bool,
    /// Whether the engine currently holds a prepared sink.
    loaded: bool,
}

impl Handler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cmd_tx: Sender<EngineCmd>,
        state_tx: Sender<AudioState>,
        ticker: ProgressTicker,
        prefs: PrefsStore,
        controls: ControlsSettings,
        position: PositionHandle,
        track_count: usize,
        resume: PlaybackPrefs,
    ) -> Self {
        Self {
            cmd_tx,
            state_tx,
            ticker,
            prefs,
            controls,
            position,
            track_count,
            resume: Some(resume),
            current_index: None,
            duration: None,
            is_playing: false,
            loaded: false,
        }
    }

    /// Handle a user/controller intent. Returns true when the player
    /// should shut down.
    pub fn handle_event(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::PlayPause => self.play_or_pause(),
            PlayerEvent::SelectedAudioChange(i) => match select_action(self.current_index, i) {
                SelectAction::Toggle => self.play_or_pause(),
                SelectAction::Switch => self.start_play(i),
            },
            PlayerEvent::SeekTo(pos) => {
                let _ = self.cmd_tx.send(EngineCmd::SeekTo(pos));
            }
            PlayerEvent::UpdateProgress(fraction) => {
                if let Some(total) = self.duration {
                    let pos = fraction_position(total, fraction);
                    let _ = self.cmd_tx.send(EngineCmd::SeekTo(pos));
                }
            }
            PlayerEvent::Backward => {
                let pos = self
                    .elapsed()
                    .saturating_sub(Duration::from_secs(self.controls.seek_back_seconds));
                let _ = self.cmd_tx.send(EngineCmd::SeekTo(pos));
            }
            PlayerEvent::Forward => {
                let pos = self.elapsed() + Duration::from_secs(self.controls.seek_forward_seconds);
                let _ = self.cmd_tx.send(EngineCmd::SeekTo(pos));
            }
            PlayerEvent::SeekToNext => match self.current_index {
                Some(i) if i + 1 < self.track_count => self.start_play(i + 1),
                Some(_) => {}
                None if self.track_count > 0 => self.start_play(0),
                None => {}
            },
            PlayerEvent::SeekToPrevious => match self.current_index {
                // At the head of the list "previous" restarts the track.
                Some(0) => {
                    let _ = self.cmd_tx.send(EngineCmd::SeekTo(Duration::ZERO));
                }
                Some(i) => self.start_play(i - 1),
                None => {}
            },
            PlayerEvent::Stop => {
                let _ = self.cmd_tx.send(EngineCmd::Stop);
            }
            PlayerEvent::Quit => {
                self.ticker.stop();
                self.persist(self.elapsed());
                let _ = self.cmd_tx.send(EngineCmd::Quit);
                return true;
            }
        }
        false
    }

    /// Handle an engine transition: republish it as an `AudioState` event,
    /// gate the progress ticker and persist the distilled preferences.
    pub fn handle_callback(&mut self, callback: EngineCallback) {
        match callback {
            EngineCallback::TrackChanged { index, duration } => {
                self.loaded = true;
                self.current_index = Some(index);
                self.duration = Some(duration);
                let _ = self.state_tx.send(AudioState::CurrentPlaying { index });
                let _ = self.state_tx.send(AudioState::Ready { duration });
                self.persist(Duration::ZERO);
            }
            EngineCallback::PlayingChanged {
                is_playing,
                position,
            } => {
                self.is_playing = is_playing;
                let _ = self.state_tx.send(AudioState::Playing { is_playing });
                if is_playing {
                    self.ticker.start();
                } else {
                    self.ticker.stop();
                }
                self.persist(position);
            }
            EngineCallback::Seeked { position } => {
                // The engine rebuilds its source around a seek; surface the
                // gap as a buffering tick at the target position.
                let _ = self.state_tx.send(AudioState::Buffering { position });
            }
            EngineCallback::Stopped => {
                self.loaded = false;
                self.is_playing = false;
                self.ticker.stop();
                let _ = self.state_tx.send(AudioState::Playing { is_playing: false });
                self.persist(Duration::ZERO);
            }
        }
    }

    fn play_or_pause(&mut self) {
        if self.is_playing {
            let _ = self.cmd_tx.send(EngineCmd::Pause);
        } else if self.loaded {
            let _ = self.cmd_tx.send(EngineCmd::Resume);
        } else if self.track_count > 0 {
            let index = self
                .current_index
                .or_else(|| self.resume.map(|r| r.last_index))
                .unwrap_or(0)
                .min(self.track_count - 1);
            self.start_play(index);
        }
    }

    fn start_play(&mut self, index: usize) {
        if index >= self.track_count {
            return;
        }

        // The remembered offset applies once, to the remembered track.
        let start_at = match self.resume.take() {
            Some(saved) if saved.last_index == index => {
                Duration::from_millis(saved.last_position_ms)
            }
            _ => Duration::ZERO,
        };

        let _ = self.cmd_tx.send(EngineCmd::PlayAt { index, start_at });
    }

    fn elapsed(&self) -> Duration {
        self.position
            .lock()
            .map(|info| info.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    fn persist(&self, position: Duration) {
        // Fire-and-forget: a failed write never interrupts playback.
        let _ = self.prefs.save(&PlaybackPrefs {
            last_index: self.current_index.unwrap_or(0),
            last_position_ms: position.as_millis() as u64,
            was_playing: self.is_playing,
        });
    }

    #[cfg(test)]
    pub fn ticker_running(&self) -> bool {
        self.ticker.is_running()
    }
}
