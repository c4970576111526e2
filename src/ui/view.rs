use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::pomodoro::collaborators::DisplaySink;
use crate::pomodoro::pomodoro::{Cadence, POMODOROS_PER_SESSION, StatusLabel};

const WINDOW_WIDTH: u16 = 44;
const WINDOW_HEIGHT: u16 = 22;

const TEXT: Color = Color::Rgb(0x2c, 0x3e, 0x50);
const MUTED: Color = Color::Rgb(0x66, 0x66, 0x66);
const START_BG: Color = Color::Rgb(0x4c, 0xaf, 0x50);
const STOP_BG: Color = Color::Rgb(0xf4, 0x43, 0x36);
const DISABLED_BG: Color = Color::Rgb(0xcc, 0xcc, 0xcc);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub minutes: u32,
    pub seconds: u32,
    pub current_session: u32,
    pub session_target: u32,
    pub pomodoro_count: u32,
    pub status: StatusLabel,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            current_session: 0,
            session_target: 0,
            pomodoro_count: 0,
            status: StatusLabel::Ready,
        }
    }
}

impl ViewModel {
    pub fn time_text(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    pub fn progress_text(&self) -> String {
        format!(
            "Session {}/{} - Pomodori {}/{}",
            self.current_session, self.session_target, self.pomodoro_count, POMODOROS_PER_SESSION
        )
    }
}

impl DisplaySink for ViewModel {
    fn on_time_update(&mut self, minutes: u32, seconds: u32) {
        self.minutes = minutes;
        self.seconds = seconds;
    }

    fn on_progress_update(&mut self, current_session: u32, session_target: u32, pomodoro_count: u32) {
        self.current_session = current_session;
        self.session_target = session_target;
        self.pomodoro_count = pomodoro_count;
    }

    fn on_status_update(&mut self, label: StatusLabel) {
        self.status = label;
    }
}

pub struct Screen<'a> {
    pub view: &'a ViewModel,
    pub cadence: Cadence,
    pub session_input: &'a str,
    pub running: bool,
}

// Clickable regions from the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub start: Rect,
    pub stop: Rect,
    pub cadences: [Rect; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Start,
    Stop,
    Cadence(Cadence),
}

impl HitAreas {
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        if self.start.contains(pos) {
            return Some(Target::Start);
        }
        if self.stop.contains(pos) {
            return Some(Target::Stop);
        }
        Cadence::ALL
            .iter()
            .zip(self.cadences.iter())
            .find(|(_, area)| area.contains(pos))
            .map(|(cadence, _)| Target::Cadence(*cadence))
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn button(label: &str, bg: Color, fg: Color) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(bg))
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
}

pub fn render(frame: &mut Frame, screen: &Screen) -> HitAreas {
    let window = centered(frame.area(), WINDOW_WIDTH, WINDOW_HEIGHT);
    let [
        title,
        _,
        cadence_row,
        sessions_row,
        _,
        timer,
        _,
        status,
        _,
        buttons,
        progress,
        _,
        help,
    ] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(window);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "POMODORO",
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        title,
    );

    let cadence_areas: [Rect; 2] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(cadence_row);
    for (cadence, area) in Cadence::ALL.iter().zip(cadence_areas.iter()) {
        let selected = *cadence == screen.cadence;
        let marker = if selected { "(•)" } else { "( )" };
        let mut style = Style::default().fg(if screen.running { MUTED } else { TEXT });
        if selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{} {}", marker, cadence.label()), style))
                .alignment(Alignment::Center),
            *area,
        );
    }

    let cursor = if screen.running { "" } else { "_" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Sessions: ", Style::default().fg(TEXT)),
            Span::styled(
                format!("[{}{}]", screen.session_input, cursor),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center),
        sessions_row,
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                screen.view.time_text(),
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)),
        timer,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(screen.view.status.text(), Style::default().fg(TEXT)))
            .alignment(Alignment::Center),
        status,
    );

    let [start, _, stop] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(buttons);
    if screen.running {
        frame.render_widget(button("Start", DISABLED_BG, MUTED), start);
    } else {
        frame.render_widget(button("Start", START_BG, Color::White), start);
    }
    frame.render_widget(button("Stop", STOP_BG, Color::White), stop);

    frame.render_widget(
        Paragraph::new(Span::styled(screen.view.progress_text(), Style::default().fg(MUTED)))
            .alignment(Alignment::Center),
        progress,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter start · Esc stop · Tab mode · ^Q quit",
            Style::default().fg(MUTED),
        ))
        .alignment(Alignment::Center),
        help,
    );

    HitAreas {
        start,
        stop,
        cadences: cadence_areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(screen: &Screen) -> (Vec<String>, HitAreas) {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        let mut areas = HitAreas::default();
        terminal
            .draw(|frame| areas = render(frame, screen))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let rows = buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect();
        (rows, areas)
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn test_view_model_formats_time_and_progress() {
        let mut view = ViewModel::default();
        view.on_time_update(5, 7);
        view.on_progress_update(2, 3, 1);
        assert_eq!(view.time_text(), "05:07");
        assert_eq!(view.progress_text(), "Session 2/3 - Pomodori 1/4");
    }

    #[test]
    fn test_idle_window_shows_zero_state() {
        let view = ViewModel::default();
        let (rows, _) = draw(&Screen {
            view: &view,
            cadence: Cadence::ThirtyTen,
            session_input: "1",
            running: false,
        });

        assert!(contains(&rows, "POMODORO"));
        assert!(contains(&rows, "(•) 30min/10min"));
        assert!(contains(&rows, "( ) 20min/5min"));
        assert!(contains(&rows, "Sessions: [1_]"));
        assert!(contains(&rows, "00:00"));
        assert!(contains(&rows, "Ready to start"));
        assert!(contains(&rows, "Session 0/0 - Pomodori 0/4"));
    }

    #[test]
    fn test_running_window_shows_countdown() {
        let view = ViewModel {
            minutes: 19,
            seconds: 42,
            current_session: 1,
            session_target: 2,
            pomodoro_count: 3,
            status: StatusLabel::ShortBreak,
        };
        let (rows, _) = draw(&Screen {
            view: &view,
            cadence: Cadence::TwentyFive,
            session_input: "2",
            running: true,
        });

        assert!(contains(&rows, "(•) 20min/5min"));
        assert!(contains(&rows, "Sessions: [2]"));
        assert!(contains(&rows, "19:42"));
        assert!(contains(&rows, "Short break"));
        assert!(contains(&rows, "Session 1/2 - Pomodori 3/4"));
    }

    #[test]
    fn test_hit_areas_resolve_clicks() {
        let view = ViewModel::default();
        let (_, areas) = draw(&Screen {
            view: &view,
            cadence: Cadence::ThirtyTen,
            session_input: "1",
            running: false,
        });

        assert_eq!(areas.target_at(areas.start.x + 1, areas.start.y + 1), Some(Target::Start));
        assert_eq!(areas.target_at(areas.stop.x + 1, areas.stop.y + 1), Some(Target::Stop));
        let second = areas.cadences[1];
        assert_eq!(
            areas.target_at(second.x, second.y),
            Some(Target::Cadence(Cadence::TwentyFive))
        );
        assert_eq!(areas.target_at(0, 0), None);
    }
}
