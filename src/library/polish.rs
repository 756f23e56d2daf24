//! Cleanup helpers for raw index strings.
//!
//! File names and tag values arrive with underscores, stray separators and
//! `<unknown>` placeholders; these helpers turn them into something fit for
//! a track list.

/// Turn a raw file name into a display string: separators become spaces,
/// a trailing audio extension is dropped, the first letter is uppercased.
pub fn polish_name(raw: &str, extensions: &[String]) -> String {
    let mut name = raw.to_string();

    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() {
            continue;
        }
        let suffix = format!(".{ext}");
        if name.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
            name.truncate(name.len() - suffix.len());
            break;
        }
    }

    let name = name.replace(['_', '-'], " ");
    capitalize(name.trim())
}

/// Clean an artist string: the index reports absent artists as `<unknown>`,
/// so angle brackets are shed before capitalizing.
pub fn polish_artist(raw: &str) -> String {
    let cleaned = raw.replace(['<', '>'], "");
    capitalize(cleaned.trim())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["mp3".into(), "flac".into()]
    }

    #[test]
    fn polish_name_strips_extension_and_separators() {
        assert_eq!(polish_name("my_cool-song.mp3", &exts()), "My cool song");
        assert_eq!(polish_name("track.MP3", &exts()), "Track");
        assert_eq!(polish_name("plain", &exts()), "Plain");
    }

    #[test]
    fn polish_name_leaves_unknown_extensions_alone() {
        assert_eq!(polish_name("notes.txt", &exts()), "Notes.txt");
    }

    #[test]
    fn polish_artist_sheds_placeholder_brackets() {
        assert_eq!(polish_artist("<unknown>"), "Unknown");
        assert_eq!(polish_artist("  The Band "), "The Band");
        assert_eq!(polish_artist(""), "");
    }
}
