//! Recurring tick schedule contract.
//!
//! # Responsibility
//! - Define how the countdown acquires and releases its one-second
//!   schedule.
//! - Provide a thread-backed implementation for hosts without a platform
//!   interval.
//!
//! # Invariants
//! - Dropping the guard cancels tick delivery; a released schedule never
//!   invokes a callback again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Source of recurring ticks for a countdown.
///
/// `acquire` hands out a guard that owns the schedule; releasing (dropping)
/// the guard tears the schedule down. The countdown component holds the
/// guard for exactly the `Running` portion of its lifecycle.
pub trait TickSchedule {
    type Guard;

    fn acquire(&self, period: Duration) -> Self::Guard;
}

/// Guard for a thread-backed interval. Cancels the interval when dropped.
#[derive(Debug)]
pub struct IntervalGuard {
    cancelled: Arc<AtomicBool>,
}

impl Drop for IntervalGuard {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Interval ticks produced by a background thread and delivered over an
/// mpsc channel, so the owner applies them on its own single thread.
#[derive(Debug)]
pub struct ThreadSchedule {
    tick_tx: mpsc::Sender<()>,
}

impl ThreadSchedule {
    /// Creates the schedule and the receiving end its ticks arrive on.
    pub fn new() -> (Self, mpsc::Receiver<()>) {
        let (tick_tx, tick_rx) = mpsc::channel();
        (Self { tick_tx }, tick_rx)
    }
}

impl TickSchedule for ThreadSchedule {
    type Guard = IntervalGuard;

    fn acquire(&self, period: Duration) -> IntervalGuard {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let tick_tx = self.tick_tx.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Relaxed) {
                break;
            }
            if tick_tx.send(()).is_err() {
                // Receiver gone: the owning screen was torn down.
                break;
            }
        });

        IntervalGuard { cancelled }
    }
}
