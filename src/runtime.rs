use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Period of the session countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PomoEvent {
    Key(KeyEvent),
    Resize,
    /// One scheduler period elapsed while armed
    Tick,
    /// Nothing happened within one interval and no tick was due
    Idle,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait PomoEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<PomoEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                // Windows reports both press and release
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(PomoEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(PomoEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(%err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PomoEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PomoEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PomoEvent>) -> Self {
        Self { rx }
    }
}

impl PomoEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// A recurring callback that can be armed and disarmed.
///
/// While armed the scheduler reports a deadline; the runner delivers one
/// tick when it passes and calls [`Scheduler::mark_fired`]. Disarming clears
/// the deadline, so no tick can be delivered until the next `arm`.
pub trait Scheduler {
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
    /// When the next tick is due, or None while disarmed
    fn next_deadline(&self) -> Option<Instant>;
    /// Record that the pending tick was delivered
    fn mark_fired(&mut self);
}

/// Wall clock scheduler firing once per ticker interval
#[derive(Debug)]
pub struct IntervalScheduler<T: Ticker> {
    ticker: T,
    deadline: Option<Instant>,
}

impl<T: Ticker> IntervalScheduler<T> {
    pub fn new(ticker: T) -> Self {
        Self {
            ticker,
            deadline: None,
        }
    }
}

impl Default for IntervalScheduler<FixedTicker> {
    fn default() -> Self {
        Self::new(FixedTicker::default())
    }
}

impl<T: Ticker> Scheduler for IntervalScheduler<T> {
    fn arm(&mut self) {
        // Re-arming keeps the current deadline so a second arm cannot double up ticks
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.ticker.interval());
        }
    }

    fn disarm(&mut self) {
        self.deadline = None;
    }

    fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn mark_fired(&mut self) {
        // Overdue periods stay due, so a stalled loop catches up one tick per step
        if let Some(deadline) = self.deadline {
            self.deadline = Some(deadline + self.ticker.interval());
        }
    }
}

/// Scheduler for tests and headless drivers: an armed scheduler is always due
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    armed: bool,
    pub arm_calls: usize,
    pub disarm_calls: usize,
    pub fired: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self) {
        self.armed = true;
        self.arm_calls += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarm_calls += 1;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.armed.then(Instant::now)
    }

    fn mark_fired(&mut self) {
        self.fired += 1;
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: PomoEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: PomoEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Returns the next input event, or Tick once the scheduler's deadline passes.
    /// A disarmed scheduler never produces Tick; after one ticker interval
    /// without input the runner yields Idle instead.
    pub fn step<S: Scheduler + ?Sized>(&self, scheduler: &mut S) -> PomoEvent {
        let Some(deadline) = scheduler.next_deadline() else {
            return match self.recv(self.ticker.interval()) {
                Some(ev) => ev,
                None => PomoEvent::Idle,
            };
        };

        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.recv(timeout) {
            Some(ev) => ev,
            None => {
                scheduler.mark_fired();
                PomoEvent::Tick
            }
        }
    }

    fn recv(&self, timeout: Duration) -> Option<PomoEvent> {
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // No more input will arrive; still honour the wait so ticks keep their pace
                std::thread::sleep(timeout);
                None
            }
        }
    }
}
