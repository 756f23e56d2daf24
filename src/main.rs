mod app;
mod config;
mod library;
mod mpris;
mod player;
mod prefs;
mod runtime;
mod store;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
