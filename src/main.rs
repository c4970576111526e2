use log::{info, warn};

mod config;
mod logging;
mod notify;
mod pomodoro;
mod ui;

use config::Settings;
use pomodoro::pomodoro::{Cadence, POMODOROS_PER_SESSION};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_error) = Settings::load();

    let log_path = settings.log_path();
    logging::init(&log_path)?;
    if let Some(e) = config_error {
        warn!("Using default settings: {}", e);
    }

    info!("🍅 Pomodoro Timer");
    for cadence in Cadence::ALL {
        info!(
            "Cadence {}: {}min work / {}min short break / {}min long break every {} pomodori",
            cadence.name(),
            cadence.work_seconds() / 60,
            cadence.short_break_seconds() / 60,
            cadence.long_break_seconds() / 60,
            POMODOROS_PER_SESSION
        );
    }
    info!(
        "Starting with cadence {} and {:?} session(s), logging to {}",
        settings.cadence.name(),
        settings.sessions,
        log_path.display()
    );

    ui::run(&settings).await
}
