use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::library::Audio;

use super::sink::create_sink_at;
use super::types::{EngineCallback, EngineCmd, PositionHandle};

/// Worker thread owning the audio output stream.
///
/// Accepts low-level commands and republishes every internal transition as
/// an `EngineCallback` for the service handler to observe. Elapsed time is
/// kept in the shared position handle (monotonic start instant plus time
/// accumulated across pauses).
pub(super) fn spawn_engine(
    audios: Vec<Audio>,
    rx: Receiver<EngineCmd>,
    callbacks: Sender<EngineCallback>,
    position: PositionHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            audios,
            callbacks,
            position,
            sink: None,
            index: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    EngineCmd::PlayAt { index, start_at } => {
                        if index < engine.audios.len() {
                            engine.play_at(index, start_at);
                        }
                    }
                    EngineCmd::Pause => engine.pause(),
                    EngineCmd::Resume => engine.resume(),
                    EngineCmd::SeekTo(pos) => engine.seek_to(pos),
                    EngineCmd::Stop => engine.stop(),
                    EngineCmd::Quit => {
                        if let Some(s) = engine.sink.as_ref() {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    engine.refresh_position();
                    engine.auto_advance();
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

struct Engine {
    stream: OutputStream,
    audios: Vec<Audio>,
    callbacks: Sender<EngineCallback>,
    position: PositionHandle,

    sink: Option<Sink>,
    index: Option<usize>,
    paused: bool,

    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Engine {
    fn play_at(&mut self, i: usize, start_at: Duration) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }

        let new_sink = match create_sink_at(&self.stream, &self.audios[i], start_at) {
            Ok(s) => s,
            Err(_) => {
                // Open/decode failure: the file is the decoder's problem,
                // we just stop cleanly.
                self.stop();
                return;
            }
        };

        new_sink.play();
        self.sink = Some(new_sink);
        self.index = Some(i);
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.accumulated = start_at;

        if let Ok(mut info) = self.position.lock() {
            info.index = Some(i);
            info.elapsed = start_at;
            info.playing = true;
        }

        let _ = self.callbacks.send(EngineCallback::TrackChanged {
            index: i,
            duration: self.audios[i].duration,
        });
        let _ = self.callbacks.send(EngineCallback::PlayingChanged {
            is_playing: true,
            position: start_at,
        });
    }

    fn pause(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }

        s.pause();
        if let Some(st) = self.started_at {
            self.accumulated += st.elapsed();
        }
        self.started_at = None;
        self.paused = true;

        if let Ok(mut info) = self.position.lock() {
            info.elapsed = self.accumulated;
            info.playing = false;
        }
        let _ = self.callbacks.send(EngineCallback::PlayingChanged {
            is_playing: false,
            position: self.accumulated,
        });
    }

    fn resume(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if !self.paused {
            return;
        }

        s.play();
        self.started_at = Some(Instant::now());
        self.paused = false;

        if let Ok(mut info) = self.position.lock() {
            info.playing = true;
        }
        let _ = self.callbacks.send(EngineCallback::PlayingChanged {
            is_playing: true,
            position: self.accumulated,
        });
    }

    fn seek_to(&mut self, pos: Duration) {
        let Some(i) = self.index else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        let total = self.audios[i].duration;
        let pos = if total > Duration::ZERO { pos.min(total) } else { pos };

        // Scrubbing: rebuild the sink and skip into the file.
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        let new_sink = match create_sink_at(&self.stream, &self.audios[i], pos) {
            Ok(s) => s,
            Err(_) => {
                self.stop();
                return;
            }
        };

        if self.paused {
            self.started_at = None;
        } else {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = Some(new_sink);
        self.accumulated = pos;

        if let Ok(mut info) = self.position.lock() {
            info.elapsed = pos;
        }
        let _ = self.callbacks.send(EngineCallback::Seeked { position: pos });
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.sink = None;
        self.index = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;

        if let Ok(mut info) = self.position.lock() {
            info.index = None;
            info.elapsed = Duration::ZERO;
            info.playing = false;
        }
        let _ = self.callbacks.send(EngineCallback::Stopped);
    }

    /// Push the computed elapsed time into the shared handle so the
    /// progress ticker reads a current value.
    fn refresh_position(&self) {
        if self.paused {
            return;
        }
        let elapsed = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        if let Ok(mut info) = self.position.lock() {
            info.elapsed = elapsed;
        }
    }

    /// When the current track drains, move to the next one; after the last,
    /// stop and report the end of the list.
    fn auto_advance(&mut self) {
        let (Some(s), Some(i)) = (self.sink.as_ref(), self.index) else {
            return;
        };
        if self.paused || !s.empty() {
            return;
        }

        if i + 1 < self.audios.len() {
            self.play_at(i + 1, Duration::ZERO);
        } else {
            self.stop();
        }
    }
}
