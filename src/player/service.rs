use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::ControlsSettings;
use crate::library::Audio;
use crate::prefs::{PlaybackPrefs, PrefsStore};

use super::engine::spawn_engine;
use super::handler::Handler;
use super::ticker::{PROGRESS_INTERVAL, ProgressTicker};
use super::types::{AudioState, PlayerEvent, PositionHandle, PositionInfo};

/// The playback service: engine thread + handler thread, glued by channels.
///
/// Callers push `PlayerEvent`s in and observe the `AudioState` stream
/// returned by `spawn`.
pub struct Player {
    events: Sender<PlayerEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn spawn(
        audios: Vec<Audio>,
        controls: ControlsSettings,
        prefs: PrefsStore,
        resume: PlaybackPrefs,
    ) -> (Self, Receiver<AudioState>) {
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
        let (state_tx, state_rx) = mpsc::channel::<AudioState>();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (callback_tx, callback_rx) = mpsc::channel();
        let position: PositionHandle = Arc::new(Mutex::new(PositionInfo::default()));

        let track_count = audios.len();
        let engine = spawn_engine(audios, cmd_rx, callback_tx, position.clone());

        let ticker = ProgressTicker::new(PROGRESS_INTERVAL, position.clone(), state_tx.clone());
        let mut handler = Handler::new(
            cmd_tx,
            state_tx.clone(),
            ticker,
            prefs,
            controls,
            position.clone(),
            track_count,
            resume,
        );

        let join = thread::spawn(move || {
            let _ = state_tx.send(AudioState::Initial);

            loop {
                // Engine callbacks first, so published state reflects the
                // engine before the next intent is applied.
                while let Ok(cb) = callback_rx.try_recv() {
                    handler.handle_callback(cb);
                }

                match event_rx.recv_timeout(Duration::from_millis(50)) {
                    Ok(event) => {
                        if handler.handle_event(event) {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => {
                        handler.handle_event(PlayerEvent::Quit);
                        break;
                    }
                }
            }

            let _ = engine.join();
        });

        (
            Self {
                events: event_tx,
                join: Mutex::new(Some(join)),
            },
            state_rx,
        )
    }

    pub fn send(&self, event: PlayerEvent) -> Result<(), mpsc::SendError<PlayerEvent>> {
        self.events.send(event)
    }

    /// Ask the service to quit and wait for both threads to wind down.
    pub fn shutdown(&self) {
        let _ = self.send(PlayerEvent::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
