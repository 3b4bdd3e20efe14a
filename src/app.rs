use crate::input::Action;
use crate::notify::Notifier;
use crate::pomodoro::Pomodoro;
use crate::runtime::{PomoEvent, Scheduler};

/// Whether the event loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<S: Scheduler> {
    pub pomodoro: Pomodoro<S>,
}

impl<S: Scheduler> App<S> {
    pub fn new(scheduler: S, notifier: Box<dyn Notifier>) -> Self {
        Self {
            pomodoro: Pomodoro::new(scheduler, notifier),
        }
    }

    pub fn apply(&mut self, action: Action) -> Flow {
        match action {
            Action::PlayPause => self.pomodoro.toggle(),
            Action::Stop => {
                // stop is only offered while a session exists
                if self.pomodoro.has_session() {
                    self.pomodoro.stop();
                }
            }
            Action::Adjust(kind, direction) => {
                self.pomodoro.adjust_duration(kind, direction);
            }
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Feed one runtime event into the app
    pub fn handle_event(&mut self, event: PomoEvent) -> Flow {
        match event {
            PomoEvent::Tick => {
                self.pomodoro.tick();
                Flow::Continue
            }
            PomoEvent::Key(key) => match crate::input::action_for_key(key) {
                Some(action) => self.apply(action),
                None => Flow::Continue,
            },
            PomoEvent::Resize | PomoEvent::Idle => Flow::Continue,
        }
    }
}
