use crate::app::App;
use crate::prefs::PlaybackPrefs;

/// Apply the saved playback record to the freshly built model.
///
/// The saved index selects the remembered row (clamped to the current
/// library, which may have shrunk since last run); the record is returned
/// so it can seed the player's first play of that track.
pub fn apply_saved_state(app: &mut App, saved: PlaybackPrefs) -> PlaybackPrefs {
    if !app.has_tracks() {
        return PlaybackPrefs::default();
    }

    let last_index = saved.last_index.min(app.audios.len() - 1);
    app.set_selected(last_index);

    PlaybackPrefs {
        last_index,
        ..saved
    }
}
