use std::path::PathBuf;
use std::time::Duration;

/// A single music file known to the library.
///
/// Immutable value object: built when the index is scanned or the cache is
/// read, never mutated afterwards. A fresh scan supersedes old records
/// (same `id`) rather than updating them.
#[derive(Clone, Debug, PartialEq)]
pub struct Audio {
    /// Stable numeric identity, derived from the absolute path.
    pub id: i64,
    /// `file://` locator for the track.
    pub uri: String,
    /// Polished file name shown in lists.
    pub display_name: String,
    /// Track artist, "Unknown" when the tags carry none.
    pub artist: String,
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Total track duration; zero when the file could not be probed.
    pub duration: Duration,
    /// Tag title, or the polished file stem as a fallback.
    pub title: String,
}
