use dayboard_core::{
    format_clock, parse_duration_input, CountdownError, CountdownSession, CountdownState,
    CountdownTimer, ThreadSchedule, TickOutcome, TickSchedule,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

/// Schedule stub that tracks how many guards are alive, without threads.
#[derive(Clone, Default)]
struct ManualSchedule {
    active: Rc<Cell<usize>>,
}

struct ManualGuard {
    active: Rc<Cell<usize>>,
}

impl Drop for ManualGuard {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
    }
}

impl TickSchedule for ManualSchedule {
    type Guard = ManualGuard;

    fn acquire(&self, _period: Duration) -> ManualGuard {
        self.active.set(self.active.get() + 1);
        ManualGuard {
            active: Rc::clone(&self.active),
        }
    }
}

#[test]
fn countdown_runs_exactly_n_ticks_to_expiry() {
    let duration = 7;
    let mut session = CountdownSession::new();
    session.start(duration).unwrap();

    let mut ticks = 0;
    loop {
        ticks += 1;
        match session.tick().unwrap() {
            TickOutcome::Running { remaining_seconds } => {
                assert_eq!(remaining_seconds, duration - ticks);
            }
            TickOutcome::Expired => break,
        }
    }

    assert_eq!(ticks, duration);
    assert_eq!(session.state(), CountdownState::Expired);
    assert_eq!(session.remaining_seconds(), 0);
}

#[test]
fn stop_zeroes_remaining_without_completion_signal() {
    let mut session = CountdownSession::new();
    session.start(10).unwrap();
    session.tick().unwrap();
    session.tick().unwrap();

    session.stop().unwrap();

    assert_eq!(session.state(), CountdownState::Expired);
    assert_eq!(session.remaining_seconds(), 0);
    assert!(!session.is_running());
    // A stopped session no longer ticks, so no expiry signal can follow.
    assert_eq!(session.tick().unwrap_err(), CountdownError::NotRunning);
}

#[test]
fn start_with_zero_is_rejected_and_state_unchanged() {
    let mut session = CountdownSession::new();
    let err = session.start(0).unwrap_err();

    assert!(matches!(err, CountdownError::InvalidDuration(_)));
    assert_eq!(session.state(), CountdownState::Idle);
    assert_eq!(session.remaining_seconds(), 0);
}

#[test]
fn non_numeric_and_non_positive_input_is_a_validation_error() {
    for input in ["abc", "-3", "0", " ", "12.5"] {
        assert!(matches!(
            parse_duration_input(input),
            Err(CountdownError::InvalidDuration(_))
        ));
    }
    assert_eq!(parse_duration_input("90").unwrap(), 90);
}

#[test]
fn reentrant_start_is_rejected_without_reset() {
    let mut session = CountdownSession::new();
    session.start(30).unwrap();
    session.tick().unwrap();

    assert_eq!(session.start(5).unwrap_err(), CountdownError::AlreadyRunning);
    assert_eq!(session.remaining_seconds(), 29);
    assert!(session.is_running());
}

#[test]
fn session_can_restart_after_expiry() {
    let mut session = CountdownSession::new();
    session.start(1).unwrap();
    assert_eq!(session.tick().unwrap(), TickOutcome::Expired);

    session.start(3).unwrap();
    assert!(session.is_running());
    assert_eq!(session.remaining_seconds(), 3);
}

#[test]
fn timer_holds_schedule_only_while_running() {
    let schedule = ManualSchedule::default();
    let active = Rc::clone(&schedule.active);
    let mut timer = CountdownTimer::new(schedule);

    assert!(!timer.schedule_active());
    timer.start(3).unwrap();
    assert!(timer.schedule_active());
    assert_eq!(active.get(), 1);

    timer.tick().unwrap();
    assert!(timer.schedule_active());

    timer.stop().unwrap();
    assert!(!timer.schedule_active());
    assert_eq!(active.get(), 0);
}

#[test]
fn timer_releases_schedule_on_natural_expiry() {
    let schedule = ManualSchedule::default();
    let active = Rc::clone(&schedule.active);
    let mut timer = CountdownTimer::new(schedule);

    timer.start(2).unwrap();
    assert_eq!(timer.tick().unwrap(), TickOutcome::Running { remaining_seconds: 1 });
    assert_eq!(timer.tick().unwrap(), TickOutcome::Expired);

    assert!(!timer.schedule_active());
    assert_eq!(active.get(), 0);
    assert_eq!(timer.display(), "00:00");
}

#[test]
fn dropping_the_timer_releases_the_schedule() {
    let schedule = ManualSchedule::default();
    let active = Rc::clone(&schedule.active);
    let mut timer = CountdownTimer::new(schedule);
    timer.start(60).unwrap();
    assert_eq!(active.get(), 1);

    drop(timer);
    assert_eq!(active.get(), 0);
}

#[test]
fn display_formats_remaining_as_mm_ss() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(9), "00:09");
    assert_eq!(format_clock(125), "02:05");
    assert_eq!(format_clock(600), "10:00");
}

#[test]
fn thread_schedule_delivers_ticks_and_stops_after_cancel() {
    let (schedule, ticks) = ThreadSchedule::new();
    let guard = schedule.acquire(Duration::from_millis(5));

    ticks
        .recv_timeout(Duration::from_secs(2))
        .expect("interval should deliver a tick");

    drop(guard);
    drop(schedule);

    // Pending ticks may still drain; the channel must then disconnect.
    loop {
        match ticks.recv_timeout(Duration::from_secs(2)) {
            Ok(()) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => panic!("interval thread did not stop"),
        }
    }
}
