//! Narrow interfaces between the sequencer and the outside world.
//!
//! The sequencer never draws, sleeps or talks to the desktop itself. It calls
//! these traits and the host event loop provides the implementations.

use std::time::Duration;

use super::pomodoro::StatusLabel;

/// Arms a single continuation. The host calls `PhaseSequencer::tick` once the
/// delay has elapsed.
pub trait TickDriver {
    fn after(&mut self, delay: Duration);
}

/// Receives everything the window shows.
pub trait DisplaySink {
    fn on_time_update(&mut self, minutes: u32, seconds: u32);
    fn on_progress_update(&mut self, current_session: u32, session_target: u32, pomodoro_count: u32);
    fn on_status_update(&mut self, label: StatusLabel);
}

/// Fire-and-forget desktop notification. Failures stay inside the implementation.
pub trait Notifier {
    fn notify(&mut self, title: &str, message: &str);
}
