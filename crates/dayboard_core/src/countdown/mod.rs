//! Countdown timer component.
//!
//! # Responsibility
//! - Pair the countdown state machine with explicit ownership of its
//!   recurring one-second schedule.
//!
//! # Invariants
//! - The schedule guard is acquired on `start` and released on every exit
//!   transition: stop, natural expiry, or dropping the component.

pub mod schedule;
pub mod session;

use schedule::TickSchedule;
use session::{format_clock, CountdownError, CountdownSession, CountdownState, TickOutcome};
use std::time::Duration;

/// Period of the recurring countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Countdown component owning both the state machine and the pending
/// schedule handle.
///
/// The handle is a plain field rather than ambient state, so tearing the
/// component down can never leak a recurring callback into a dead screen.
pub struct CountdownTimer<S: TickSchedule> {
    session: CountdownSession,
    schedule: S,
    guard: Option<S::Guard>,
}

impl<S: TickSchedule> CountdownTimer<S> {
    pub fn new(schedule: S) -> Self {
        Self {
            session: CountdownSession::new(),
            schedule,
            guard: None,
        }
    }

    /// Starts the countdown and acquires the tick schedule.
    pub fn start(&mut self, duration_seconds: u32) -> Result<(), CountdownError> {
        self.session.start(duration_seconds)?;
        self.guard = Some(self.schedule.acquire(TICK_PERIOD));
        Ok(())
    }

    /// Applies one elapsed-second tick, releasing the schedule on expiry.
    pub fn tick(&mut self) -> Result<TickOutcome, CountdownError> {
        let outcome = self.session.tick()?;
        if outcome == TickOutcome::Expired {
            self.guard = None;
        }
        Ok(outcome)
    }

    /// Stops the countdown and releases the schedule, without the
    /// completion signal.
    pub fn stop(&mut self) -> Result<(), CountdownError> {
        self.session.stop()?;
        self.guard = None;
        Ok(())
    }

    pub fn state(&self) -> CountdownState {
        self.session.state()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Whether the recurring schedule is currently held.
    pub fn schedule_active(&self) -> bool {
        self.guard.is_some()
    }

    /// Current remaining time rendered as `MM:SS`.
    pub fn display(&self) -> String {
        format_clock(self.session.remaining_seconds())
    }
}
