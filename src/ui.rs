use chrono::{Duration as ChronoDuration, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use crate::{
    app::App,
    format::{format_minutes, format_seconds},
    pomodoro::TimerStatus,
    runtime::Scheduler,
    session::Phase,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl<S: Scheduler> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pomodoro = &self.pomodoro;
        let config = pomodoro.config();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // durations
                Constraint::Length(1), // controls
                Constraint::Length(1), // padding
                Constraint::Length(1), // session header
                Constraint::Length(1), // time remaining
                Constraint::Length(1), // paused / ends at
                Constraint::Length(1), // progress
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        // durations are locked while a session exists
        let duration_style = if pomodoro.has_session() {
            dim_style
        } else {
            bold_style
        };
        let duration_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        Paragraph::new(Span::styled(
            format!(
                "Focus Duration: {}  (←/→)",
                format_minutes(config.focus_minutes)
            ),
            duration_style,
        ))
        .render(duration_cols[0], buf);

        Paragraph::new(Span::styled(
            format!(
                "Break Duration: {}  (↓/↑)",
                format_minutes(config.break_minutes)
            ),
            duration_style,
        ))
        .alignment(Alignment::Right)
        .render(duration_cols[1], buf);

        let play_label = match pomodoro.status() {
            TimerStatus::Stopped => "(space) start",
            TimerStatus::Running => "(space) pause",
            TimerStatus::Paused => "(space) resume",
        };
        let stop_style = if pomodoro.has_session() {
            bold_style
        } else {
            dim_style
        };
        Paragraph::new(Line::from(vec![
            Span::styled(play_label, bold_style.fg(Color::Cyan)),
            Span::raw("   "),
            Span::styled("(s) stop", stop_style),
        ]))
        .render(chunks[1], buf);

        if let (Some(session), Some(minutes)) = (pomodoro.session(), pomodoro.phase_minutes()) {
            let phase_color = match session.phase {
                Phase::Focusing => Color::Red,
                Phase::OnBreak => Color::Green,
            };

            Paragraph::new(Span::styled(
                format!("{} for {} minutes", session.phase, format_minutes(minutes)),
                bold_style.fg(phase_color),
            ))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

            Paragraph::new(format!(
                "{} remaining",
                format_seconds(session.time_remaining)
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

            let status_line = if pomodoro.is_running() {
                let ends_at =
                    Local::now() + ChronoDuration::seconds(i64::from(session.time_remaining));
                Span::styled(format!("ends at {}", ends_at.format("%H:%M")), dim_style)
            } else {
                Span::styled(
                    "PAUSED",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                )
            };
            Paragraph::new(status_line)
                .alignment(Alignment::Center)
                .render(chunks[5], buf);

            let ratio = pomodoro.progress().unwrap_or(0.0);
            let percent = pomodoro.progress_percent().unwrap_or(0);
            Gauge::default()
                .gauge_style(Style::default().fg(phase_color))
                .ratio(ratio)
                .label(format!("{percent}%"))
                .render(chunks[6], buf);
        }

        Paragraph::new(Span::styled(
            "(space) start/pause / (s)top / ←→ focus / ↓↑ break / (q)uit",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
    }
}
