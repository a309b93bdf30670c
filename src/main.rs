mod api;
mod app;
mod config;
mod player;
mod runtime;
mod search;
mod toast;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    runtime::run()
}
