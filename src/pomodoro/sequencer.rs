use log::{debug, info, warn};
use thiserror::Error;

use super::collaborators::{DisplaySink, Notifier, TickDriver};
use super::pomodoro::{Cadence, POMODOROS_PER_SESSION, Phase, StatusLabel, tick_interval};

const NOTIFICATION_TITLE: &str = "Pomodoro";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequencerError {
    #[error("invalid session count: {0:?}")]
    InvalidInput(String),
    #[error("cadence cannot change while the timer is running")]
    CadenceLocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub running: bool,
    pub session_target: u32,
    pub current_session: u32, // 1-indexed while running
    pub pomodoro_count: u32,  // Completed work phases in this session
    pub phase: Phase,
    pub remaining_seconds: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            running: false,
            session_target: 0,
            current_session: 0,
            pomodoro_count: 0,
            phase: Phase::Work,
            remaining_seconds: 0,
        }
    }
}

pub fn parse_session_count(input: &str) -> Result<u32, SequencerError> {
    match input.trim().parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(SequencerError::InvalidInput(input.to_string())),
    }
}

pub struct PhaseSequencer<D, N, T> {
    cadence: Cadence,
    state: RunState,
    display: D,
    notifier: N,
    ticker: T,
}

impl<D, N, T> PhaseSequencer<D, N, T>
where
    D: DisplaySink,
    N: Notifier,
    T: TickDriver,
{
    pub fn new(cadence: Cadence, display: D, notifier: N, ticker: T) -> Self {
        let mut sequencer = Self {
            cadence,
            state: RunState::default(),
            display,
            notifier,
            ticker,
        };
        sequencer.show_zero_state(StatusLabel::Ready);
        sequencer
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn current_session(&self) -> u32 {
        self.state.current_session
    }

    pub fn session_target(&self) -> u32 {
        self.state.session_target
    }

    pub fn pomodoro_count(&self) -> u32 {
        self.state.pomodoro_count
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn tick_driver(&self) -> &T {
        &self.ticker
    }

    pub fn tick_driver_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn select_cadence(&mut self, cadence: Cadence) -> Result<(), SequencerError> {
        if self.state.running {
            warn!("Ignoring cadence change to {} while running", cadence.name());
            return Err(SequencerError::CadenceLocked);
        }
        self.cadence = cadence;
        info!("Cadence set to {}", cadence.name());
        self.display.on_status_update(StatusLabel::Ready);
        Ok(())
    }

    pub fn start(&mut self, session_input: &str) -> Result<(), SequencerError> {
        if self.state.running {
            debug!("start: already running");
            return Ok(());
        }

        let target = match parse_session_count(session_input) {
            Ok(target) => target,
            Err(e) => {
                warn!("Refusing to start: {}", e);
                self.display.on_status_update(StatusLabel::InvalidInput);
                return Err(e);
            }
        };

        self.state = RunState {
            running: true,
            session_target: target,
            current_session: 1,
            pomodoro_count: 0,
            phase: Phase::Work,
            remaining_seconds: 0,
        };
        info!(
            "Run started: {} session(s) at {}",
            target,
            self.cadence.name()
        );

        self.enter_phase(Phase::Work);
        self.ticker.after(tick_interval());
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.state.running {
            info!(
                "Timer stopped in session {}/{} with {}s left",
                self.state.current_session, self.state.session_target, self.state.remaining_seconds
            );
        }
        self.state = RunState::default();
        self.show_zero_state(StatusLabel::Stopped);
    }

    pub fn tick(&mut self) {
        if !self.state.running {
            debug!("tick: not running");
            return;
        }

        if self.state.remaining_seconds == 0 {
            self.complete_phase();
            if self.state.running {
                self.ticker.after(tick_interval());
            }
            return;
        }

        let remaining = self.state.remaining_seconds;
        self.show_progress();
        self.state.remaining_seconds = remaining - 1;
        self.ticker.after(tick_interval());
    }

    fn show_progress(&mut self) {
        let remaining = self.state.remaining_seconds;
        self.display.on_time_update(remaining / 60, remaining % 60);
        self.display.on_progress_update(
            self.state.current_session,
            self.state.session_target,
            self.state.pomodoro_count,
        );
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.remaining_seconds = self.cadence.duration_of(phase);
        self.display.on_status_update(phase.status());
        self.show_progress();
        info!(
            "{} Entering {} ({}s), session {}/{}, pomodori {}/{}",
            phase.emoji(),
            phase.as_str(),
            self.state.remaining_seconds,
            self.state.current_session,
            self.state.session_target,
            self.state.pomodoro_count,
            POMODOROS_PER_SESSION
        );
    }

    fn complete_phase(&mut self) {
        let ended = self.state.phase;
        info!("{} {} phase complete", ended.emoji(), ended.as_str());
        self.notifier.notify(NOTIFICATION_TITLE, &ended.end_message());

        match ended {
            Phase::Work => {
                self.state.pomodoro_count += 1;
                if self.state.pomodoro_count >= POMODOROS_PER_SESSION {
                    self.enter_phase(Phase::LongBreak);
                } else {
                    self.enter_phase(Phase::ShortBreak);
                }
            }
            Phase::ShortBreak => self.enter_phase(Phase::Work),
            Phase::LongBreak => {
                if self.state.current_session < self.state.session_target {
                    self.state.current_session += 1;
                    self.state.pomodoro_count = 0;
                    info!(
                        "Advancing to session {}/{}",
                        self.state.current_session, self.state.session_target
                    );
                    self.enter_phase(Phase::Work);
                } else {
                    info!("All {} session(s) complete", self.state.session_target);
                    self.stop();
                }
            }
        }
    }

    fn show_zero_state(&mut self, label: StatusLabel) {
        self.display.on_time_update(0, 0);
        self.display.on_progress_update(0, 0, 0);
        self.display.on_status_update(label);
    }
}
