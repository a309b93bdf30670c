use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{ApiCmd, ApiEvent, ApiHandle};
use crate::app::{App, HealthBadge};
use crate::config;
use crate::player::Player;
use crate::search::SearchDebouncer;
use crate::toast::ToastManager;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// One-shot deadline for the startup health probes.
    pub health_check_at: Option<Instant>,
    /// When the simulated playback last advanced.
    pub last_player_tick: Instant,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new(health_check_at: Instant) -> Self {
        Self {
            health_check_at: Some(health_check_at),
            last_player_tick: Instant::now(),
            pending_gg: false,
        }
    }
}

/// Main terminal event loop: drains worker events, fires the debounced
/// search, advances the simulated playback once a second, expires toasts,
/// draws, and dispatches keys. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    api: &ApiHandle,
    toasts: &mut ToastManager,
    debounce: &mut SearchDebouncer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();

        // Startup probes, once, after their delay.
        if let Some(at) = state.health_check_at {
            if now >= at {
                state.health_check_at = None;
                app.service_health = HealthBadge::Checking;
                app.storage_health = HealthBadge::Checking;
                let _ = api.send(ApiCmd::HealthCheck);
            }
        }

        // Results coming back from the worker.
        while let Some(api_event) = api.try_recv() {
            handle_api_event(api_event, app, toasts);
        }

        // The debounced query, once its quiet window has closed.
        if let Some(query) = debounce.poll(now) {
            let _ = api.send(ApiCmd::Search(query));
        }

        // Simulated playback advances one second at a time.
        if now.duration_since(state.last_player_tick) >= Duration::from_secs(1) {
            state.last_player_tick = now;
            if let Some(notice) = player.tick() {
                toasts.notice(notice);
            }
        }

        toasts.tick();

        terminal.draw(|f| ui::draw(f, app, player, toasts, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, player, api, toasts, debounce, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Fold a worker event into the page model. Every failure surfaces exactly
/// one error toast, here and nowhere else.
fn handle_api_event(event: ApiEvent, app: &mut App, toasts: &mut ToastManager) {
    match event {
        ApiEvent::SearchResults { query, tracks } => {
            app.set_search_results(query, tracks);
        }

        ApiEvent::Recommendations { kind, tracks } => {
            app.set_recommendations(kind, tracks);
        }

        ApiEvent::Rated {
            song_id,
            new_rating,
        } => {
            app.apply_rating(song_id, new_rating);
            toasts.success("Rating saved");
        }

        ApiEvent::ServiceHealth(result) => match result {
            Ok(health) if health.is_ok() => {
                app.service_health = HealthBadge::Up;
                toasts.success("Service is up");
            }
            Ok(health) => {
                app.service_health = HealthBadge::Down;
                toasts.warning(format!(
                    "Service reported: {}",
                    health.message.unwrap_or(health.status)
                ));
            }
            Err(message) => {
                app.service_health = HealthBadge::Down;
                toasts.error(format!("Health check failed: {message}"));
            }
        },

        ApiEvent::StorageHealth(result) => match result {
            Ok(health) if health.is_ok() => {
                app.storage_health = HealthBadge::Up;
                toasts.success("Database connected");
            }
            Ok(health) => {
                app.storage_health = HealthBadge::Down;
                toasts.warning(format!(
                    "Database reported: {}",
                    health.message.unwrap_or(health.status)
                ));
            }
            Err(message) => {
                app.storage_health = HealthBadge::Down;
                toasts.error(format!("Database check failed: {message}"));
            }
        },

        ApiEvent::Failed { context, message } => {
            app.loading = false;
            toasts.error(format!("{context}: {message}"));
        }
    }
}

/// Dispatch one key press. Returns `true` when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    player: &mut Player,
    api: &ApiHandle,
    toasts: &mut ToastManager,
    debounce: &mut SearchDebouncer,
    state: &mut EventLoopState,
) -> bool {
    if app.search_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                app.clear_search();
                debounce.cancel();
            }
            KeyCode::Backspace => {
                app.pop_search_char();
                debounce.input(&app.search_input, Instant::now());
            }
            KeyCode::Enter => {
                // Keep the query and whatever results it produced.
                app.exit_search_mode();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_search_char(c);
                    debounce.input(&app.search_input, Instant::now());
                }
            }
            _ => {}
        }

        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_search_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                if app.has_results() {
                    app.select_first();
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            if app.has_results() {
                app.select_last();
            }
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if let Some(track) = app.selected_track().cloned() {
                toasts.notice(player.play(track));
            }
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            if let Some(track) = app.selected_track().cloned() {
                toasts.notice(player.add_to_playlist(track));
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.pending_gg = false;
            if let Some(notice) = player.toggle() {
                toasts.notice(notice);
            }
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            if let Some(notice) = player.previous() {
                toasts.notice(notice);
            }
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            if let Some(notice) = player.next() {
                toasts.notice(notice);
            }
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            player.stop();
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            player.close();
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let percent = player.progress_percent() - 10.0;
            player.seek(percent);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let percent = player.progress_percent() + 10.0;
            player.seek(percent);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            player.set_volume(player.volume - 0.05);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            player.set_volume(player.volume + 0.05);
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            app.loading = true;
            let _ = api.send(ApiCmd::Recommendations(app.rec_kind));
        }
        KeyCode::Char('t') => {
            state.pending_gg = false;
            let kind = app.cycle_rec_kind();
            toasts.info(format!("Recommendations: {}", kind.label()));
        }
        KeyCode::Char(c @ '3'..='5') => {
            state.pending_gg = false;
            // Quick-rate only applies to recommendation rows.
            if app.showing_recommendations() {
                if let Some(track) = app.selected_track() {
                    let rating = c.to_digit(10).unwrap_or(0) as f64;
                    let _ = api.send(ApiCmd::Rate {
                        song_id: track.id,
                        rating,
                    });
                }
            }
        }
        KeyCode::Char('C') => {
            state.pending_gg = false;
            toasts.notice(player.clear_playlist());
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            toasts.dismiss_oldest();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
