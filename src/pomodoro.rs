use crate::notify::Notifier;
use crate::runtime::Scheduler;
use crate::session::{Direction, DurationKind, Phase, Session, TimerConfig};

/// Coarse view of where the timer is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Stopped,
    Running,
    Paused,
}

/// Owns the timer state and keeps the scheduler armed exactly while running.
///
/// Every mutation goes through the operations below. Calls that do not make
/// sense in the current state (ticking while stopped, adjusting a duration
/// mid-session) are logged and ignored.
pub struct Pomodoro<S: Scheduler> {
    session: Option<Session>,
    config: TimerConfig,
    is_running: bool,
    scheduler: S,
    notifier: Box<dyn Notifier>,
}

impl<S: Scheduler> Pomodoro<S> {
    pub fn new(scheduler: S, notifier: Box<dyn Notifier>) -> Self {
        Self {
            session: None,
            config: TimerConfig::default(),
            is_running: false,
            scheduler,
            notifier,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn status(&self) -> TimerStatus {
        match (self.session.is_some(), self.is_running) {
            (false, _) => TimerStatus::Stopped,
            (true, true) => TimerStatus::Running,
            (true, false) => TimerStatus::Paused,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Play/pause button: start from stopped, resume when paused, pause when running
    pub fn toggle(&mut self) {
        match self.status() {
            TimerStatus::Stopped => self.start(),
            TimerStatus::Paused => self.resume(),
            TimerStatus::Running => self.pause(),
        }
    }

    /// Begin a focus session. Only valid from stopped.
    pub fn start(&mut self) {
        if self.session.is_some() {
            tracing::debug!(status = ?self.status(), "start ignored, session already exists");
            return;
        }

        let session = Session::begin(Phase::Focusing, &self.config);
        tracing::info!(
            focus_minutes = self.config.focus_minutes,
            break_minutes = self.config.break_minutes,
            "session started"
        );
        self.session = Some(session);
        self.set_running(true);
    }

    pub fn pause(&mut self) {
        if self.status() != TimerStatus::Running {
            tracing::debug!(status = ?self.status(), "pause ignored");
            return;
        }
        tracing::info!(remaining = self.time_remaining(), "paused");
        self.set_running(false);
    }

    pub fn resume(&mut self) {
        if self.status() != TimerStatus::Paused {
            tracing::debug!(status = ?self.status(), "resume ignored");
            return;
        }
        tracing::info!(remaining = self.time_remaining(), "resumed");
        self.set_running(true);
    }

    /// Discard the session and restore the default durations
    pub fn stop(&mut self) {
        tracing::info!(status = ?self.status(), "stopped");
        self.set_running(false);
        self.session = None;
        self.config = TimerConfig::default();
    }

    /// Advance the session by one second, switching phase once time runs out
    pub fn tick(&mut self) {
        if !self.is_running {
            tracing::debug!("tick ignored, timer not running");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.time_remaining > 0 {
            session.time_remaining -= 1;
            return;
        }

        let entering = session.phase.next();
        *session = Session::begin(entering, &self.config);
        tracing::info!(phase = %entering, remaining = session.time_remaining, "phase changed");

        if let Err(err) = self.notifier.notify(entering) {
            tracing::warn!(%err, "notification failed");
        }
    }

    /// Step the focus or break duration. Only valid while stopped; returns
    /// whether the configuration changed.
    pub fn adjust_duration(&mut self, kind: DurationKind, direction: Direction) -> bool {
        if self.session.is_some() {
            tracing::debug!(?kind, ?direction, "duration locked during session");
            return false;
        }

        let changed = self.config.step(kind, direction);
        if changed {
            tracing::debug!(
                focus_minutes = self.config.focus_minutes,
                break_minutes = self.config.break_minutes,
                "durations adjusted"
            );
        }
        changed
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.session.map(|s| s.time_remaining)
    }

    /// Configured minutes of the phase currently running
    pub fn phase_minutes(&self) -> Option<u32> {
        self.session.map(|s| self.config.minutes_for(s.phase))
    }

    /// Elapsed share of the current phase in `[0, 1]`, None when stopped
    pub fn progress(&self) -> Option<f64> {
        self.session.map(|s| progress(&s, &self.config))
    }

    /// Elapsed share of the current phase as a whole percentage
    pub fn progress_percent(&self) -> Option<u16> {
        self.progress().map(|p| (p * 100.0).round() as u16)
    }

    fn set_running(&mut self, running: bool) {
        self.is_running = running;
        if running {
            self.scheduler.arm();
        } else {
            self.scheduler.disarm();
        }
    }
}

/// `1 - remaining / total` for the session's phase, clamped to `[0, 1]`
pub fn progress(session: &Session, config: &TimerConfig) -> f64 {
    let total = config.minutes_for(session.phase) * 60;
    if total == 0 {
        return 0.0;
    }
    (1.0 - f64::from(session.time_remaining) / f64::from(total)).clamp(0.0, 1.0)
}
