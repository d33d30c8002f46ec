//! Countdown state machine.
//!
//! # Responsibility
//! - Own the `Idle -> Running -> Expired` lifecycle of one countdown.
//! - Validate user-entered durations before any transition.
//!
//! # Invariants
//! - `remaining_seconds` never goes negative and only decreases while
//!   running.
//! - `start` while already running is rejected, never a silent reset.
//! - Explicit `stop` never reports the natural-expiry completion signal.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle state of a countdown session.
///
/// Explicit stop and natural expiry share the terminal `Expired` state; the
/// caller distinguishes them by whether `tick` reported
/// [`TickOutcome::Expired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No countdown configured yet.
    Idle,
    /// Counting down once per elapsed second.
    Running,
    /// Reached zero or explicitly stopped.
    Expired,
}

/// Result of one elapsed-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Running { remaining_seconds: u32 },
    /// Countdown reached zero. This is the completion signal; the caller
    /// maps it to a one-shot alert and a haptic pulse.
    Expired,
}

/// Countdown contract violations and input validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// Duration input was non-numeric, zero or negative.
    InvalidDuration(String),
    /// `start` was called while a countdown is already running.
    AlreadyRunning,
    /// `tick` or `stop` was called without a running countdown.
    NotRunning,
}

impl Display for CountdownError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration(input) => {
                write!(f, "invalid countdown duration `{input}`: expected a positive number of seconds")
            }
            Self::AlreadyRunning => write!(f, "countdown is already running"),
            Self::NotRunning => write!(f, "countdown is not running"),
        }
    }
}

impl Error for CountdownError {}

/// Single countdown session. One instance per screen activation; nothing is
/// persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSession {
    state: CountdownState,
    remaining_seconds: u32,
}

impl CountdownSession {
    pub const fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            remaining_seconds: 0,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Starts counting down from `duration_seconds`.
    ///
    /// # Contract
    /// - Valid from `Idle` and `Expired` only; running sessions reject the
    ///   call instead of resetting.
    /// - `duration_seconds` must be positive.
    pub fn start(&mut self, duration_seconds: u32) -> Result<(), CountdownError> {
        if self.is_running() {
            return Err(CountdownError::AlreadyRunning);
        }
        if duration_seconds == 0 {
            return Err(CountdownError::InvalidDuration("0".to_string()));
        }
        self.state = CountdownState::Running;
        self.remaining_seconds = duration_seconds;
        Ok(())
    }

    /// Advances the countdown by one elapsed second.
    ///
    /// # Contract
    /// - Valid only while running.
    /// - At zero, transitions to `Expired` and reports the completion
    ///   signal exactly once.
    pub fn tick(&mut self) -> Result<TickOutcome, CountdownError> {
        if !self.is_running() {
            return Err(CountdownError::NotRunning);
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.state = CountdownState::Expired;
            return Ok(TickOutcome::Expired);
        }
        Ok(TickOutcome::Running {
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Stops a running countdown immediately.
    ///
    /// # Contract
    /// - Valid only while running.
    /// - Sets `remaining_seconds = 0` without reporting the completion
    ///   signal.
    pub fn stop(&mut self) -> Result<(), CountdownError> {
        if !self.is_running() {
            return Err(CountdownError::NotRunning);
        }
        self.state = CountdownState::Expired;
        self.remaining_seconds = 0;
        Ok(())
    }
}

impl Default for CountdownSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses free-text duration input from the screen's text field.
///
/// Rejects non-numeric, zero and negative values with the same validation
/// error the state machine reports for a zero duration.
pub fn parse_duration_input(input: &str) -> Result<u32, CountdownError> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value > 0 && value <= i64::from(u32::MAX) => Ok(value as u32),
        _ => Err(CountdownError::InvalidDuration(trimmed.to_string())),
    }
}

/// Renders a second count as zero-padded `MM:SS`.
///
/// Pure, stateless display helper.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
