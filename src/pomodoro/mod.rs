pub mod collaborators;
pub mod pomodoro;
pub mod sequencer;
