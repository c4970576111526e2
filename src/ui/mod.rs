pub mod app;
pub mod ticker;
pub mod view;

use std::io::{self, Stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Settings;
use crate::notify::desktop::DesktopNotifier;
use app::App;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

struct TerminalGuard; // restores the terminal on any exit path

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

pub async fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = DesktopNotifier::new(settings.notification_timeout_secs);
    let mut app = App::new(settings.cadence, &settings.sessions, notifier);

    let _guard = TerminalGuard;
    let mut terminal = init()?;
    app.run(&mut terminal).await
}
