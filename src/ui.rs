//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};
use crate::config::{ControlsSettings, UiSettings};

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render the controls help text, incorporating the seek increments.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!(
            "[H/L] seek -{}s/+{}s",
            controls.seek_back_seconds, controls.seek_forward_seconds
        ),
        "[1-9] jump %".to_string(),
        "[home] restart".to_string(),
        "[x] stop".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Build the "now playing" line from the current model.
fn now_playing_text(app: &App) -> String {
    let Some(audio) = app.now_playing_audio() else {
        // `ready` flips on the first prepared track, so distinguish a fresh
        // start from a player that ran and was stopped.
        return if app.ready {
            "Stopped".to_string()
        } else {
            "Nothing playing".to_string()
        };
    };

    let state = match app.playback_state() {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };

    let mut line = if audio.artist.trim().is_empty() {
        format!("{state}: {}", audio.title)
    } else {
        format!("{state}: {} - {}", audio.artist, audio.title)
    };

    if let Some(total) = app.duration {
        line.push_str(&format!(
            " [{} / {}]",
            format_mmss(app.position),
            format_mmss(total)
        ));
    }
    if app.buffering {
        line.push_str(" (buffering)");
    }
    line
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now-playing status
    let status = Paragraph::new(now_playing_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Progress gauge
    let gauge_label = format!("{} ", format_mmss(app.position));
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(app.progress_fraction() as f64)
        .label(gauge_label);
    frame.render_widget(gauge, chunks[2]);

    // Track list
    {
        // Center the selected item when possible by creating a visible window.
        // Important: only build ListItems for the visible window (avoid allocating the entire list).
        let total = app.audios.len();
        let list_height = chunks[3].height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app.audios[start..end]
            .iter()
            .enumerate()
            .map(|(offset, audio)| {
                let marker = if app.now_playing == Some(start + offset) {
                    "♪ "
                } else {
                    "  "
                };
                ListItem::new(format!("{marker}{}", audio.display_name))
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
