use std::env;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::player::Player;
use crate::prefs::{PrefsStore, resolve_state_path};
use crate::store::{AudioCache, load_library, resolve_cache_path};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let settings = settings::load_settings();

    // `--fresh` drops the cached library and saved playback state before
    // starting, forcing a rescan of the index.
    let args: Vec<String> = env::args().skip(1).collect();
    let fresh = args.iter().any(|a| a == "--fresh");
    let dir = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(|p| p.to_str().map(|s| s.to_string()))
                .unwrap_or_else(|| "Music".to_string())
        });

    let cache_path =
        resolve_cache_path(&settings.storage).context("could not resolve a cache path")?;
    let mut cache = AudioCache::open(&cache_path)?;
    if fresh {
        cache.clear()?;
    }
    let audios = load_library(&mut cache, Path::new(&dir), &settings.library)?;

    let state_path =
        resolve_state_path(&settings.storage).context("could not resolve a state path")?;
    let prefs_store = PrefsStore::new(state_path);
    if fresh {
        prefs_store.clear()?;
    }
    let saved = prefs_store.load();

    let mut app = App::new(audios.clone());
    app.follow_playback = settings.ui.follow_playback;
    let saved = startup::apply_saved_state(&mut app, saved);

    let (player, state_rx) = Player::spawn(audios, settings.controls.clone(), prefs_store, saved);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<()> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &player,
            &state_rx,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
