use strum_macros::Display;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

pub const FOCUS_MINUTES_MIN: u32 = 5;
pub const FOCUS_MINUTES_MAX: u32 = 60;
pub const FOCUS_STEP_MINUTES: u32 = 5;

pub const BREAK_MINUTES_MIN: u32 = 1;
pub const BREAK_MINUTES_MAX: u32 = 15;
pub const BREAK_STEP_MINUTES: u32 = 1;

/// Which half of the pomodoro cycle a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    #[strum(serialize = "Focusing")]
    Focusing,
    #[strum(serialize = "On Break")]
    OnBreak,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Focusing => Phase::OnBreak,
            Phase::OnBreak => Phase::Focusing,
        }
    }
}

/// A session in progress. Absence of a session means the timer is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    pub time_remaining: u32,
}

impl Session {
    /// A fresh session for `phase`, sized from the current configuration
    pub fn begin(phase: Phase, config: &TimerConfig) -> Self {
        Self {
            phase,
            time_remaining: config.minutes_for(phase) * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationKind {
    Focus,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Configured focus and break lengths, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerConfig {
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focusing => self.focus_minutes,
            Phase::OnBreak => self.break_minutes,
        }
    }

    /// Step one duration in `direction`.
    /// Returns false and leaves the value untouched when the step would leave its range.
    pub fn step(&mut self, kind: DurationKind, direction: Direction) -> bool {
        let (value, step, min, max) = match kind {
            DurationKind::Focus => (
                &mut self.focus_minutes,
                FOCUS_STEP_MINUTES,
                FOCUS_MINUTES_MIN,
                FOCUS_MINUTES_MAX,
            ),
            DurationKind::Break => (
                &mut self.break_minutes,
                BREAK_STEP_MINUTES,
                BREAK_MINUTES_MIN,
                BREAK_MINUTES_MAX,
            ),
        };

        let next = match direction {
            Direction::Increase => value.checked_add(step),
            Direction::Decrease => value.checked_sub(step),
        };

        match next {
            Some(n) if (min..=max).contains(&n) => {
                *value = n;
                true
            }
            _ => false,
        }
    }
}
