//! The repeating progress poll.
//!
//! While playback runs, a small timer thread samples the shared position
//! handle and emits a `Progress` tick on every interval. The thread exists
//! only between `start` and `stop`; stopping joins it, so no tick can
//! arrive after `stop` returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use super::types::{AudioState, PositionHandle};

/// How often the position is sampled while playing.
pub(super) const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

pub(super) struct ProgressTicker {
    interval: Duration,
    position: PositionHandle,
    tx: Sender<AudioState>,
    running: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn new(interval: Duration, position: PositionHandle, tx: Sender<AudioState>) -> Self {
        Self {
            interval,
            position,
            tx,
            running: Arc::new(AtomicBool::new(false)),
            join: None,
        }
    }

    /// Begin emitting `Progress` ticks. No-op when already running.
    pub fn start(&mut self) {
        if self.join.is_some() {
            return;
        }

        let running = Arc::new(AtomicBool::new(true));
        self.running = running.clone();

        let position = self.position.clone();
        let tx = self.tx.clone();
        let interval = self.interval;

        self.join = Some(thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                thread::sleep(interval);
                if !running.load(Ordering::Relaxed) {
                    break;
                }
                let pos = position
                    .lock()
                    .map(|info| info.elapsed)
                    .unwrap_or(Duration::ZERO);
                if tx.send(AudioState::Progress { position: pos }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop emitting and wait for the timer thread to finish.
    /// No-op when not running.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
