use std::path::PathBuf;
use std::time::Duration;

use crate::library::Audio;

/// A cached audio record: the same fields as `Audio`, but reduced to the
/// primitive/string representations the `audio` table stores.
///
/// Keyed by `id` and replaced wholesale on conflict; rows persist until the
/// cache is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioRow {
    pub id: i64,
    pub uri: String,
    pub display_name: String,
    pub artist: String,
    pub path: String,
    pub duration_ms: i64,
    pub title: String,
}

impl From<&Audio> for AudioRow {
    fn from(audio: &Audio) -> Self {
        Self {
            id: audio.id,
            uri: audio.uri.clone(),
            display_name: audio.display_name.clone(),
            artist: audio.artist.clone(),
            path: audio.path.display().to_string(),
            duration_ms: audio.duration.as_millis() as i64,
            title: audio.title.clone(),
        }
    }
}

impl From<AudioRow> for Audio {
    fn from(row: AudioRow) -> Self {
        Self {
            id: row.id,
            uri: row.uri,
            display_name: row.display_name,
            artist: row.artist,
            path: PathBuf::from(row.path),
            duration: Duration::from_millis(row.duration_ms.max(0) as u64),
            title: row.title,
        }
    }
}
