//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.
//! Everything here is a projection of `App`, `Player` and `ToastManager`
//! state; nothing is read back out of the frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, ResultsSource};
use crate::config::UiSettings;
use crate::player::{PlaybackState, Player};
use crate::toast::{Severity, Toast, ToastManager};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("a".to_string(), "add to playlist".to_string());
    map.insert("space".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next".to_string());
    map.insert("H/L".to_string(), "seek -/+10%".to_string());
    map.insert("-/+".to_string(), "volume".to_string());
    map.insert("/".to_string(), "search".to_string());
    map.insert("r".to_string(), "recommendations".to_string());
    map.insert("t".to_string(), "rec strategy".to_string());
    map.insert("3..5".to_string(), "rate".to_string());
    map.insert("C".to_string(), "clear playlist".to_string());
    map.insert("x".to_string(), "close player".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text for the footer.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "gg/G", "enter", "a", "space", "h/l", "H/L", "-/+", "3..5", "/", "r", "t", "C",
        "x", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a number of seconds as `M:SS`, e.g. `125` -> `"2:05"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render a rating in `[0, 5]` as exactly five star markers: `floor(r)`
/// full stars, one half star when the fraction reaches 0.5, empty stars
/// for the rest.
pub fn stars(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating - rating.floor() >= 0.5;

    let mut out = String::new();
    for _ in 0..full {
        out.push('★');
    }
    if half {
        out.push('⯪');
    }
    while out.chars().count() < 5 {
        out.push('☆');
    }
    out
}

/// One search-result row.
fn track_line(track: &crate::api::Track) -> String {
    let mut line = format!("{} — {}", track.title, track.artist);
    if let Some(album) = track.album.as_deref().filter(|a| !a.trim().is_empty()) {
        line.push_str(&format!(" ({album})"));
    }
    if let Some(genre) = track.genre.as_deref().filter(|g| !g.trim().is_empty()) {
        line.push_str(&format!("  [{genre}]"));
    }
    line.push_str(&format!("  {}", format_duration(track.duration.unwrap_or(0.0))));
    line
}

/// One recommendation row: rank, score badge and the current star rating.
fn rec_line(rank: usize, track: &crate::api::Track) -> String {
    let badge = match track.score {
        Some(score) => format!("{score:.1}"),
        None => "rec".to_string(),
    };
    let mut line = format!("{:>2}. {} — {}  ({badge})", rank + 1, track.title, track.artist);
    if let Some(rating) = track.avg_rating {
        line.push_str(&format!("  {}", stars(rating)));
    }
    if let Some(genre) = track.genre.as_deref().filter(|g| !g.trim().is_empty()) {
        line.push_str(&format!("  [{genre}]"));
    }
    line.push_str(&format!("  {}", format_duration(track.duration.unwrap_or(0.0))));
    line
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Title of the results block, depending on where the list came from.
fn results_title(app: &App) -> String {
    match &app.source {
        ResultsSource::None => " results ".to_string(),
        ResultsSource::Search { query } => {
            format!(" results for \"{}\" ({}) ", query, app.results.len())
        }
        ResultsSource::Recommendations { kind } => {
            format!(" recommendations: {} ({}) ", kind.label(), app.results.len())
        }
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    player: &Player,
    toasts: &ToastManager,
    ui_settings: &UiSettings,
) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ];
    if player.visible {
        constraints.push(Constraint::Length(5));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" recital ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!("API: {}", app.service_health.label()));
        parts.push(format!("DB: {}", app.storage_health.label()));
        parts.push(format!("Recs: {}", app.rec_kind.label()));
        parts.push(format!("Playlist: {}", player.playlist.len()));

        if app.search_mode {
            parts.push(format!("SEARCH: {}▏", app.search_input));
        } else if !app.search_input.trim().is_empty() {
            parts.push(format!("SEARCH: {}", app.search_input));
        }

        if app.loading {
            parts.push("loading…".to_string());
        }

        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Results
    draw_results(frame, app, chunks[2]);

    // Player bar
    if player.visible {
        draw_player(frame, player, chunks[3]);
    }

    // Footer
    let footer = Paragraph::new(controls_text())
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
    frame.render_widget(footer, chunks[chunks.len() - 1]);

    // Toasts overlay the results area, newest under older ones.
    draw_toasts(frame, toasts.visible(), chunks[2]);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(results_title(app));

    if app.source == ResultsSource::None {
        let hint = Paragraph::new("Press / to search, r to load recommendations.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    }

    if app.no_results() {
        // An explicit notice, never an empty list body.
        let empty = Paragraph::new("No results found.")
            .style(Style::default().fg(Color::Cyan))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let recs = app.showing_recommendations();
    let items: Vec<ListItem> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let line = if recs {
                rec_line(i, track)
            } else {
                track_line(track)
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(frame: &mut Frame, player: &Player, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let (icon, line) = match (&player.current, player.state()) {
        (Some(track), PlaybackState::Playing) => {
            ("▶", format!("{} — {}", track.title, track.artist))
        }
        (Some(track), _) => ("⏸", format!("{} — {}", track.title, track.artist)),
        (None, _) => ("·", "No track selected".to_string()),
    };
    frame.render_widget(Paragraph::new(format!(" {icon} {line}")), rows[0]);

    let gauge = Gauge::default()
        .ratio(player.progress_percent() / 100.0)
        .label(format!(
            "{} / {}",
            format_duration(player.position_secs),
            format_duration(player.duration_secs)
        ))
        .gauge_style(Style::default().fg(Color::Cyan));
    frame.render_widget(gauge, rows[1]);

    let volume = format!(
        " vol {:>3}%  •  playlist: {} tracks",
        (player.volume * 100.0).round() as u32,
        player.playlist.len()
    );
    frame.render_widget(Paragraph::new(volume), rows[2]);
}

/// Stack toasts in the top-right corner of `area`, oldest on top.
fn draw_toasts(frame: &mut Frame, toasts: &[Toast], area: Rect) {
    if toasts.is_empty() {
        return;
    }

    let width = 44.min(area.width.saturating_sub(2)).max(10);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for toast in toasts {
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect {
            x,
            y,
            width,
            height: 3,
        };
        frame.render_widget(Clear, rect);
        let par = Paragraph::new(toast.text.as_str())
            .style(Style::default().fg(severity_color(toast.severity)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(severity_color(toast.severity))),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(par, rect);
        y += 3;
    }
}
