use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures_util::StreamExt;
use log::{debug, info};

use super::Tui;
use super::ticker::DeadlineTicker;
use super::view::{self, HitAreas, Screen, Target, ViewModel};
use crate::pomodoro::collaborators::Notifier;
use crate::pomodoro::pomodoro::Cadence;
use crate::pomodoro::sequencer::PhaseSequencer;

const MAX_SESSION_INPUT: usize = 6;

pub struct App<N> {
    sequencer: PhaseSequencer<ViewModel, N, DeadlineTicker>,
    session_input: String,
    hit_areas: HitAreas,
    should_quit: bool,
}

impl<N: Notifier> App<N> {
    pub fn new(cadence: Cadence, session_input: &str, notifier: N) -> Self {
        Self {
            sequencer: PhaseSequencer::new(cadence, ViewModel::default(), notifier, DeadlineTicker::new()),
            session_input: session_input.to_string(),
            hit_areas: HitAreas::default(),
            should_quit: false,
        }
    }

    pub fn sequencer(&self) -> &PhaseSequencer<ViewModel, N, DeadlineTicker> {
        &self.sequencer
    }

    pub fn session_input(&self) -> &str {
        &self.session_input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn screen(&self) -> Screen<'_> {
        Screen {
            view: self.sequencer.display(),
            cadence: self.sequencer.cadence(),
            session_input: self.session_input(),
            running: self.sequencer.is_running(),
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<(), Box<dyn std::error::Error>> {
        let mut events = EventStream::new();

        loop {
            let mut areas = HitAreas::default();
            terminal.draw(|frame| areas = view::render(frame, &self.screen()))?;
            self.hit_areas = areas;

            tokio::select! {
                _ = self.sequencer.tick_driver_mut().fired() => {
                    self.sequencer.tick();
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e.into()),
                        None => {
                            debug!("App::run: event stream closed");
                            break;
                        }
                    }
                }
            }

            if self.should_quit() {
                let seq = self.sequencer();
                info!(
                    "Window closed (running={}, session {}/{}, {:?}, pomodori {}, {}s left, tick pending={})",
                    seq.is_running(),
                    seq.current_session(),
                    seq.session_target(),
                    seq.phase(),
                    seq.pomodoro_count(),
                    seq.remaining_seconds(),
                    seq.tick_driver().is_armed()
                );
                debug!("Final state: {:?}", seq.state());
                break;
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Enter => self.start(),
            KeyCode::Esc => self.sequencer.stop(),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.select_cadence(self.sequencer.cadence().toggled());
            }
            KeyCode::Backspace => {
                if !self.sequencer.is_running() {
                    self.session_input.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if !self.sequencer.is_running() && self.session_input.chars().count() < MAX_SESSION_INPUT {
                    self.session_input.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        match self.hit_areas.target_at(mouse.column, mouse.row) {
            Some(Target::Start) => self.start(),
            Some(Target::Stop) => self.sequencer.stop(),
            Some(Target::Cadence(cadence)) => self.select_cadence(cadence),
            None => {}
        }
    }

    fn start(&mut self) {
        // The sequencer already put the error on the status line.
        if let Err(e) = self.sequencer.start(&self.session_input) {
            debug!("App::start: {}", e);
        }
    }

    fn select_cadence(&mut self, cadence: Cadence) {
        if cadence == self.sequencer.cadence() {
            return;
        }
        if let Err(e) = self.sequencer.select_cadence(cadence) {
            debug!("App::select_cadence: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::pomodoro::{Phase, StatusLabel};
    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Debug, Default)]
    struct CountingNotifier {
        sent: usize,
    }

    impl Notifier for CountingNotifier {
        fn notify(&mut self, _title: &str, _message: &str) {
            self.sent += 1;
        }
    }

    fn app(input: &str) -> App<CountingNotifier> {
        App::new(Cadence::ThirtyTen, input, CountingNotifier::default())
    }

    fn press(app: &mut App<CountingNotifier>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<CountingNotifier>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(app: &mut App<CountingNotifier>, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn layout(app: &mut App<CountingNotifier>) {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        let mut areas = HitAreas::default();
        terminal
            .draw(|frame| areas = view::render(frame, &app.screen()))
            .unwrap();
        app.hit_areas = areas;
    }

    #[test]
    fn test_enter_starts_with_typed_sessions() {
        let mut app = app("");
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        let seq = app.sequencer();
        assert!(seq.is_running());
        assert_eq!(seq.session_target(), 2);
        assert_eq!(seq.phase(), Phase::Work);
        assert_eq!(seq.display().time_text(), "30:00");
        assert_eq!(seq.display().status, StatusLabel::Work);
    }

    #[test]
    fn test_invalid_sessions_show_message_and_stay_stopped() {
        let mut app = app("1");
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session_input(), "abc");
        assert!(!app.sequencer().is_running());
        assert_eq!(app.sequencer().display().status, StatusLabel::InvalidInput);
    }

    #[test]
    fn test_field_is_read_only_while_running() {
        let mut app = app("1");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "9");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session_input(), "1");
    }

    #[test]
    fn test_field_length_is_capped() {
        let mut app = app("");
        type_text(&mut app, "1234567890");
        assert_eq!(app.session_input(), "123456");
    }

    #[test]
    fn test_tab_toggles_cadence_only_when_stopped() {
        let mut app = app("1");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.sequencer().cadence(), Cadence::TwentyFive);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.sequencer().cadence(), Cadence::TwentyFive);
        assert_eq!(app.sequencer().display().time_text(), "20:00");
    }

    #[test]
    fn test_esc_stops_and_zeroes_display() {
        let mut app = app("1");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        let view = app.sequencer().display();
        assert!(!app.sequencer().is_running());
        assert_eq!(view.time_text(), "00:00");
        assert_eq!(view.progress_text(), "Session 0/0 - Pomodori 0/4");
        assert_eq!(view.status, StatusLabel::Stopped);
    }

    #[test]
    fn test_ctrl_q_quits_and_plain_q_types() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.session_input(), "q");

        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app("1");
        app.handle_key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!app.sequencer().is_running());
    }

    #[test]
    fn test_mouse_clicks_drive_buttons() {
        let mut app = app("1");
        layout(&mut app);
        let areas = app.hit_areas;

        let second = areas.cadences[1];
        click(&mut app, second.x, second.y);
        assert_eq!(app.sequencer().cadence(), Cadence::TwentyFive);

        click(&mut app, areas.start.x + 1, areas.start.y + 1);
        assert!(app.sequencer().is_running());

        click(&mut app, areas.stop.x + 1, areas.stop.y + 1);
        assert!(!app.sequencer().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_follows_tick_deadlines() {
        let mut app = app("1");
        let began = Instant::now();
        press(&mut app, KeyCode::Enter);

        for _ in 0..3 {
            app.sequencer.tick_driver_mut().fired().await;
            app.sequencer.tick();
        }

        assert_eq!(began.elapsed(), Duration::from_secs(3));
        // Each tick shows the current value, then counts it down.
        assert_eq!(app.sequencer().display().time_text(), "29:58");
        assert_eq!(app.sequencer().remaining_seconds(), 1797);
        assert!(app.sequencer().tick_driver().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_after_stop_is_ignored() {
        let mut app = app("1");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        // The deadline armed before stopping still fires.
        app.sequencer.tick_driver_mut().fired().await;
        app.sequencer.tick();

        assert!(!app.sequencer().is_running());
        assert!(!app.sequencer().tick_driver().is_armed());
        assert_eq!(app.sequencer().display().time_text(), "00:00");
        assert_eq!(app.sequencer().notifier().sent, 0);
    }
}
