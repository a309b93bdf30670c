use std::time::{Duration, Instant};

use crate::api::ApiHandle;
use crate::app::App;
use crate::config;
use crate::player::Player;
use crate::search::SearchDebouncer;
use crate::toast::ToastManager;

/// Construct the page model, player, toast manager and search debouncer
/// from settings. Everything downstream receives these by reference; there
/// is no global state.
pub fn build_state(
    settings: &config::Settings,
    api: &ApiHandle,
) -> (App, Player, ToastManager, SearchDebouncer) {
    let app = App::new(settings.ui.default_recommendations);
    let player = Player::new(api.sender(), settings.player.default_volume);
    let toasts = ToastManager::new(Duration::from_millis(settings.notifications.lifetime_ms));
    let debounce = SearchDebouncer::new(
        Duration::from_millis(settings.search.debounce_ms),
        settings.search.min_query_len,
    );

    (app, player, toasts, debounce)
}

/// When the one-shot startup health probes should run.
pub fn health_check_deadline(settings: &config::Settings) -> Instant {
    Instant::now() + Duration::from_millis(settings.startup.health_check_delay_ms)
}
