use super::*;
use crate::library::Audio;
use crate::player::AudioState;
use std::time::Duration;

fn a(title: &str) -> Audio {
    Audio {
        id: 0,
        uri: format!("file:///music/{title}.mp3"),
        display_name: title.into(),
        artist: "Unknown".into(),
        path: std::path::PathBuf::from(format!("/music/{title}.mp3")),
        duration: Duration::from_secs(180),
        title: title.into(),
    }
}

#[test]
fn ready_sets_duration_and_ready_flag() {
    let mut app = App::new(vec![a("Alpha")]);
    assert!(!app.ready);

    app.apply_state(AudioState::Ready {
        duration: Duration::from_secs(120),
    });
    assert!(app.ready);
    assert_eq!(app.duration, Some(Duration::from_secs(120)));
}

#[test]
fn progress_and_buffering_ticks_move_the_position() {
    let mut app = App::new(vec![a("Alpha")]);

    app.apply_state(AudioState::Buffering {
        position: Duration::from_secs(30),
    });
    assert_eq!(app.position, Duration::from_secs(30));
    assert!(app.buffering);

    app.apply_state(AudioState::Progress {
        position: Duration::from_secs(31),
    });
    assert_eq!(app.position, Duration::from_secs(31));
    assert!(!app.buffering);
}

#[test]
fn current_playing_resets_position_and_follows() {
    let mut app = App::new(vec![a("Alpha"), a("Beta"), a("Gamma")]);
    app.position = Duration::from_secs(50);

    app.apply_state(AudioState::CurrentPlaying { index: 2 });
    assert_eq!(app.now_playing, Some(2));
    assert_eq!(app.selected, 2);
    assert_eq!(app.position, Duration::ZERO);
}

#[test]
fn current_playing_leaves_selection_alone_when_not_following() {
    let mut app = App::new(vec![a("Alpha"), a("Beta"), a("Gamma")]);
    app.follow_playback = false;
    app.selected = 0;

    app.apply_state(AudioState::CurrentPlaying { index: 2 });
    assert_eq!(app.selected, 0);
}

#[test]
fn playback_state_derives_from_now_playing_and_flag() {
    let mut app = App::new(vec![a("Alpha")]);
    assert_eq!(app.playback_state(), PlaybackState::Stopped);

    app.apply_state(AudioState::CurrentPlaying { index: 0 });
    app.apply_state(AudioState::Playing { is_playing: true });
    assert_eq!(app.playback_state(), PlaybackState::Playing);

    app.apply_state(AudioState::Playing { is_playing: false });
    assert_eq!(app.playback_state(), PlaybackState::Paused);

    app.apply_state(AudioState::Initial);
    assert_eq!(app.playback_state(), PlaybackState::Stopped);
}

#[test]
fn progress_fraction_is_position_over_duration() {
    let mut app = App::new(vec![a("Alpha")]);
    assert_eq!(app.progress_fraction(), 0.0);

    app.apply_state(AudioState::Ready {
        duration: Duration::from_secs(200),
    });
    app.apply_state(AudioState::Progress {
        position: Duration::from_secs(50),
    });
    assert!((app.progress_fraction() - 0.25).abs() < 1e-6);

    // Position past the end clamps at 1.
    app.apply_state(AudioState::Progress {
        position: Duration::from_secs(500),
    });
    assert_eq!(app.progress_fraction(), 1.0);
}

#[test]
fn selection_moves_wrap_and_disable_follow() {
    let mut app = App::new(vec![a("Alpha"), a("Beta"), a("Gamma")]);
    assert!(app.follow_playback);

    app.next();
    assert_eq!(app.selected, 1);
    assert!(!app.follow_playback);

    app.next();
    app.next();
    assert_eq!(app.selected, 0);

    app.prev();
    assert_eq!(app.selected, 2);
}

#[test]
fn set_selected_clamps_to_list_bounds() {
    let mut app = App::new(vec![a("Alpha"), a("Beta")]);
    app.set_selected(99);
    assert_eq!(app.selected, 1);

    let mut empty = App::new(vec![]);
    empty.set_selected(5);
    assert_eq!(empty.selected, 0);
    assert!(!empty.has_tracks());
}
