use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{AudioState, Player, PlayerEvent};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_mpris_index: None,
            last_mpris_playback: app.playback_state(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, the playback state
/// stream and MPRIS. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    state_rx: &mpsc::Receiver<AudioState>,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        // Fold pending playback state events into the model.
        while let Ok(audio_state) = state_rx.try_recv() {
            app.apply_state(audio_state);
        }

        // Keep MPRIS in sync even when playback changes come from XF86/media
        // keys or auto-advance.
        if app.now_playing != state.last_mpris_index
            || app.playback_state() != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = app.now_playing;
            state.last_mpris_playback = app.playback_state();
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, player, control_tx) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one external controller command. Returns true on shutdown.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App, player: &Player) -> bool {
    match cmd {
        ControlCmd::Quit => {
            player.shutdown();
            return true;
        }
        ControlCmd::Play => {
            if !app.is_playing && app.has_tracks() {
                app.follow_playback = true;
                let _ = player.send(PlayerEvent::PlayPause);
            }
        }
        ControlCmd::Pause => {
            if app.is_playing {
                let _ = player.send(PlayerEvent::PlayPause);
            }
        }
        ControlCmd::PlayPause => {
            if app.has_tracks() {
                app.follow_playback = true;
                let _ = player.send(PlayerEvent::PlayPause);
            }
        }
        ControlCmd::Stop => {
            let _ = player.send(PlayerEvent::Stop);
        }
        ControlCmd::Next => {
            if app.has_tracks() {
                app.follow_playback = true;
                let _ = player.send(PlayerEvent::SeekToNext);
            }
        }
        ControlCmd::Prev => {
            if app.has_tracks() {
                app.follow_playback = true;
                let _ = player.send(PlayerEvent::SeekToPrevious);
            }
        }
    }

    false
}

/// Apply one key press. Returns true on shutdown.
fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    player: &Player,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            player.shutdown();
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                app.follow_playback = true;
                let _ = player.send(PlayerEvent::SelectedAudioChange(app.selected));
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            let _ = player.send(PlayerEvent::Forward);
        }
        KeyCode::Char('H') => {
            let _ = player.send(PlayerEvent::Backward);
        }
        KeyCode::Char('x') => {
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Home => {
            let _ = player.send(PlayerEvent::SeekTo(Duration::ZERO));
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            // Digit keys jump to that tenth of the track, like dragging the
            // progress bar.
            let tenth = c.to_digit(10).unwrap_or(0) as f32;
            let _ = player.send(PlayerEvent::UpdateProgress(tenth / 10.0));
        }
        _ => {}
    }

    false
}
