use std::cell::RefCell;
use std::rc::Rc;

use assert_matches::assert_matches;

use tomat::error::{Error, Result};
use tomat::notify::Notifier;
use tomat::pomodoro::{Pomodoro, TimerStatus};
use tomat::runtime::{ManualScheduler, Scheduler};
use tomat::session::{Direction, DurationKind, Phase, Session, TimerConfig};

#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<Phase>>>);

impl Notifier for Log {
    fn notify(&mut self, entering: Phase) -> Result<()> {
        self.0.borrow_mut().push(entering);
        Ok(())
    }
}

struct Broken;

impl Notifier for Broken {
    fn notify(&mut self, _entering: Phase) -> Result<()> {
        Err(Error::Notify("playback unsupported".into()))
    }
}

fn pomodoro() -> (Pomodoro<ManualScheduler>, Log) {
    let log = Log::default();
    (
        Pomodoro::new(ManualScheduler::new(), Box::new(log.clone())),
        log,
    )
}

#[test]
fn default_start_then_full_focus_period() {
    let (mut p, log) = pomodoro();
    p.start();
    assert_eq!(
        p.session(),
        Some(&Session {
            phase: Phase::Focusing,
            time_remaining: 1500,
        })
    );

    // 1500 ticks count down to zero; the next one flips the phase
    for _ in 0..1500 {
        p.tick();
    }
    assert_eq!(p.time_remaining(), Some(0));
    assert!(log.0.borrow().is_empty());

    p.tick();
    assert_eq!(
        p.session(),
        Some(&Session {
            phase: Phase::OnBreak,
            time_remaining: 300,
        })
    );
    assert_eq!(*log.0.borrow(), vec![Phase::OnBreak]);
}

#[test]
fn focus_increase_clamps_at_sixty() {
    let (mut p, _) = pomodoro();
    let changed: Vec<bool> = (0..8)
        .map(|_| p.adjust_duration(DurationKind::Focus, Direction::Increase))
        .collect();

    assert_eq!(changed, vec![true, true, true, true, true, true, true, false]);
    assert_eq!(p.config().focus_minutes, 60);
}

#[test]
fn break_decrease_clamps_at_one() {
    let (mut p, _) = pomodoro();
    for _ in 0..10 {
        p.adjust_duration(DurationKind::Break, Direction::Decrease);
    }
    assert_eq!(p.config().break_minutes, 1);
}

#[test]
fn ticks_while_paused_change_nothing() {
    let (mut p, _) = pomodoro();
    p.toggle();
    p.toggle();
    assert_matches!(p.status(), TimerStatus::Paused);
    assert!(!p.scheduler().is_armed());

    let before = *p.session().unwrap();
    p.tick();
    assert_eq!(p.session(), Some(&before));
}

#[test]
fn adjust_while_running_is_ignored() {
    let (mut p, _) = pomodoro();
    p.start();
    assert!(!p.adjust_duration(DurationKind::Focus, Direction::Increase));
    assert!(!p.adjust_duration(DurationKind::Break, Direction::Increase));
    assert_eq!(p.config(), &TimerConfig::default());
}

#[test]
fn start_respects_every_valid_focus_length() {
    for steps in 0..12 {
        let (mut p, _) = pomodoro();
        for _ in 0..steps {
            p.adjust_duration(DurationKind::Focus, Direction::Decrease);
        }
        for _ in 0..steps {
            p.adjust_duration(DurationKind::Focus, Direction::Increase);
            p.adjust_duration(DurationKind::Focus, Direction::Increase);
        }
        let focus = p.config().focus_minutes;
        assert!((5..=60).contains(&focus));

        p.start();
        assert_eq!(p.time_remaining(), Some(focus * 60));
        assert!(p.is_running());
    }
}

#[test]
fn remaining_time_never_underflows() {
    let (mut p, _) = pomodoro();
    for _ in 0..4 {
        p.adjust_duration(DurationKind::Focus, Direction::Decrease);
    }
    for _ in 0..4 {
        p.adjust_duration(DurationKind::Break, Direction::Decrease);
    }
    p.start();

    let mut flips = 0;
    let mut last = p.session().unwrap().phase;
    for _ in 0..5000 {
        p.tick();
        let s = p.session().unwrap();
        assert!(s.time_remaining <= p.config().minutes_for(s.phase) * 60);
        if s.phase != last {
            flips += 1;
            last = s.phase;
        }
    }
    assert!(flips > 0);
}

#[test]
fn broken_notifier_is_not_fatal() {
    let mut p = Pomodoro::new(ManualScheduler::new(), Box::new(Broken));
    p.start();
    for _ in 0..1501 {
        p.tick();
    }
    assert_eq!(p.session().unwrap().phase, Phase::OnBreak);
    assert_matches!(p.status(), TimerStatus::Running);
}

#[test]
fn stop_from_any_state_resets() {
    let (mut p, _) = pomodoro();
    p.adjust_duration(DurationKind::Break, Direction::Increase);
    p.stop();
    assert_eq!(p.config(), &TimerConfig::default());

    p.start();
    p.stop();
    assert_matches!(p.status(), TimerStatus::Stopped);

    p.start();
    p.pause();
    p.stop();
    assert_matches!(p.status(), TimerStatus::Stopped);
    assert!(!p.is_running());
    assert!(!p.scheduler().is_armed());
    assert_eq!(p.session(), None);
}
