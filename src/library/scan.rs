use std::path::Path;
use std::time::Duration;

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Audio;
use super::polish::{polish_artist, polish_name};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Derive a stable numeric id from the absolute path.
///
/// Masked non-negative because the id also ends up in MPRIS track-id
/// object paths, which cannot carry a minus sign.
pub fn path_id(path: &Path) -> i64 {
    let digest = blake3::hash(path.to_string_lossy().as_bytes());
    let mut first = [0u8; 8];
    first.copy_from_slice(&digest.as_bytes()[..8]);
    (u64::from_le_bytes(first) & i64::MAX as u64) as i64
}

/// Scan `dir` for music files and return them sorted by display name.
///
/// This is the media-index read: every matching file becomes an `Audio`
/// record. Unreadable tags are not an error; the record falls back to
/// strings derived from the file name and a zero duration.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Audio> {
    let mut audios: Vec<Audio> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let file_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN");
            let file_stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN");

            let mut title = polish_name(file_stem, &settings.extensions);
            let mut artist = "<unknown>".to_string();
            let mut duration = Duration::ZERO;

            if let Ok(tagged) = lofty::read_from_path(path) {
                duration = tagged.properties().duration();

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.trim().to_string();
                        }
                    }
                    if let Some(v) = tag.get_string(ItemKey::TrackArtist) {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = v.to_string();
                        }
                    }
                }
            }

            audios.push(Audio {
                id: path_id(path),
                uri: format!("file://{}", path.display()),
                display_name: polish_name(file_name, &settings.extensions),
                artist: polish_artist(&artist),
                path: path.to_path_buf(),
                duration,
                title,
            });
        }
    }

    audios.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    audios
}
