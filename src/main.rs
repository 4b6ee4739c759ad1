use hacktrack::app::AppState;
use hacktrack::cli::Cli;
use hacktrack::controller::Controller;
use hacktrack::debounce::Debouncer;
use hacktrack::events::EventHandler;
use hacktrack::github::client::GithubClient;
use hacktrack::settings::SettingsStore;
use hacktrack::tui;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(100);

fn setup_verbose_logging() -> Result<()> {
    let state_dir = state_dir();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(
        "hacktrack v{} starting with verbose logging",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn state_dir() -> PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        PathBuf::from(state).join("hacktrack")
    } else if let Some(home) = home::home_dir() {
        home.join(".local").join("state").join("hacktrack")
    } else {
        std::env::temp_dir().join("hacktrack")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    let window = args.search_window()?;
    let settings = match args.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::at_default_location(),
    };
    let theme = settings.load().theme;
    tracing::debug!(path = ?settings.path(), theme = theme.label(), "loaded settings");

    let source = Arc::new(GithubClient::new(&args.api_url)?);
    let state = AppState::new(window, theme);

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {e}");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, SetTitle("")) {
            eprintln!("Failed to leave alternate screen during panic: {e}");
        }
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("hacktrack"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let events = EventHandler::new(TICK_RATE);
    let mut controller = Controller::new(
        state,
        Debouncer::new(Duration::from_millis(args.debounce_ms)),
        source,
        settings,
        events.sender(),
    );

    if let Some(user) = args.user {
        controller.set_username(&user);
        controller.handle_action(hacktrack::input::Action::SearchNow);
    }

    let result = run_app(&mut terminal, &mut controller, events).await;

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(""))?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller,
    mut events: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| tui::render::render(f, &controller.state))?;

        match events.next().await {
            Some(event) => controller.handle_event(event),
            None => return Err(eyre!("event channel closed")),
        }

        if controller.state.should_quit {
            events.stop();
            return Ok(());
        }
    }
}
