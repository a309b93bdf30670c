use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{ApiClient, ApiHandle};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let client = ApiClient::new(&settings.api)?;
    let api = ApiHandle::new(client);

    let (mut app, mut player, mut toasts, mut debounce) = startup::build_state(&settings, &api);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state =
            event_loop::EventLoopState::new(startup::health_check_deadline(&settings));

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut player,
            &api,
            &mut toasts,
            &mut debounce,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    api.quit();

    run_result
}
