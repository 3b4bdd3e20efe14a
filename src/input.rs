use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Direction, DurationKind};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start, pause or resume depending on the current state
    PlayPause,
    Stop,
    Adjust(DurationKind, Direction),
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // ctrl+c to quit
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::PlayPause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Left => Some(Action::Adjust(DurationKind::Focus, Direction::Decrease)),
        KeyCode::Right => Some(Action::Adjust(DurationKind::Focus, Direction::Increase)),
        KeyCode::Down => Some(Action::Adjust(DurationKind::Break, Direction::Decrease)),
        KeyCode::Up => Some(Action::Adjust(DurationKind::Break, Direction::Increase)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
