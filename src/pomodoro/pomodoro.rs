use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TICK_INTERVAL_MS: u64 = 1000; // One countdown step per second
pub const POMODOROS_PER_SESSION: u32 = 4; // Work phases before the long break

pub fn tick_interval() -> Duration {
    Duration::from_millis(TICK_INTERVAL_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }

    pub(crate) fn emoji(&self) -> &str {
        match self {
            Phase::Work => "💼",
            Phase::ShortBreak => "☕",
            Phase::LongBreak => "🌴",
        }
    }

    /// Label shown in the status line while this phase counts down.
    pub fn status(&self) -> StatusLabel {
        match self {
            Phase::Work => StatusLabel::Work,
            Phase::ShortBreak => StatusLabel::ShortBreak,
            Phase::LongBreak => StatusLabel::LongBreak,
        }
    }

    /// Body of the desktop notification sent when this phase runs out.
    pub fn end_message(&self) -> String {
        let what = match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "coffee break",
        };
        format!("End of {}", what)
    }
}

/// The two built-in work/break rhythms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cadence {
    #[default]
    #[serde(rename = "30/10")]
    ThirtyTen,
    #[serde(rename = "20/5")]
    TwentyFive,
}

impl Cadence {
    pub const ALL: [Cadence; 2] = [Cadence::ThirtyTen, Cadence::TwentyFive];

    pub fn work_seconds(&self) -> u32 {
        match self {
            Cadence::ThirtyTen => 30 * 60,
            Cadence::TwentyFive => 20 * 60,
        }
    }

    pub fn short_break_seconds(&self) -> u32 {
        match self {
            Cadence::ThirtyTen => 10 * 60,
            Cadence::TwentyFive => 5 * 60,
        }
    }

    pub fn long_break_seconds(&self) -> u32 {
        match self {
            Cadence::ThirtyTen => 30 * 60,
            Cadence::TwentyFive => 20 * 60,
        }
    }

    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_seconds(),
            Phase::ShortBreak => self.short_break_seconds(),
            Phase::LongBreak => self.long_break_seconds(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cadence::ThirtyTen => "30/10",
            Cadence::TwentyFive => "20/5",
        }
    }

    /// Text next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            Cadence::ThirtyTen => "30min/10min",
            Cadence::TwentyFive => "20min/5min",
        }
    }

    pub fn toggled(&self) -> Cadence {
        match self {
            Cadence::ThirtyTen => Cadence::TwentyFive,
            Cadence::TwentyFive => Cadence::ThirtyTen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Ready,
    Work,
    ShortBreak,
    LongBreak,
    Stopped,
    InvalidInput,
}

impl StatusLabel {
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::Ready => "Ready to start",
            StatusLabel::Work => "Time to work!",
            StatusLabel::ShortBreak => "Short break",
            StatusLabel::LongBreak => "Coffee break!",
            StatusLabel::Stopped => "Timer stopped",
            StatusLabel::InvalidInput => "Please enter a valid number of sessions",
        }
    }
}
