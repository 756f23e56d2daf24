use std::path::Path;

use anyhow::Result;

use crate::config::LibrarySettings;
use crate::library::{Audio, scan};

use super::cache::AudioCache;
use super::entity::AudioRow;

/// Load the library, cache-first.
///
/// A non-empty cache is the source of truth and the index is not touched.
/// An empty cache means "go fetch from the index": scan, populate the cache,
/// and return the scanned records. Either way the result is display-name
/// sorted.
pub fn load_library(
    cache: &mut AudioCache,
    root: &Path,
    settings: &LibrarySettings,
) -> Result<Vec<Audio>> {
    if !cache.is_empty()? {
        let cached = cache.fetch_all()?;
        return Ok(cached.into_iter().map(Audio::from).collect());
    }

    let scanned = scan(root, settings);
    let rows: Vec<AudioRow> = scanned.iter().map(AudioRow::from).collect();
    cache.insert_all(&rows)?;
    Ok(scanned)
}
