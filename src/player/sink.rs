//! Utilities for creating `rodio` sinks from `Audio` records.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Audio;

/// Create a paused `Sink` for `audio` that starts playback at `start_at`.
///
/// Open and decode failures bubble up so the engine can stop cleanly
/// instead of tearing the thread down.
pub(super) fn create_sink_at(handle: &OutputStream, audio: &Audio, start_at: Duration) -> Result<Sink> {
    let file = File::open(&audio.path).with_context(|| format!("failed to open {:?}", audio.path))?;

    let source = Decoder::new(BufReader::new(file))
        .with_context(|| format!("failed to decode {:?}", audio.path))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
