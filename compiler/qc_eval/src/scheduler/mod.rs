//! Cooperative suspension.
//!
//! The executor calls [`Scheduler::yield_now`] before every instruction and
//! `WAIT` calls [`Scheduler::sleep`]. Scripts never run on more than one
//! thread; the scheduler only decides how the executing thread pauses.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

/// Suspension hook owned by an interpreter.
pub trait Scheduler: Send {
    /// Give other work on the host a chance to run.
    fn yield_now(&mut self);

    /// Pause the script for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Real suspension on the current OS thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn yield_now(&mut self) {
        thread::yield_now();
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Never sleeps; records requested waits instead.
///
/// Clones share the same log, so a test can keep a handle while the
/// interpreter owns another.
#[derive(Clone, Debug, Default)]
pub struct InstantScheduler {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration passed to `sleep`, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().clone()
    }

    /// Sum of all requested waits.
    pub fn total_wait(&self) -> Duration {
        self.waits.lock().iter().sum()
    }
}

impl Scheduler for InstantScheduler {
    fn yield_now(&mut self) {}

    fn sleep(&mut self, duration: Duration) {
        self.waits.lock().push(duration);
    }
}
