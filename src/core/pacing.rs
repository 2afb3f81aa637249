//! Pacing - presentation delays kept out of the engine
//!
//! Drilling soldiers and redrawing the status screen pause for effect.
//! The pause goes through a `Pacer` so tests and headless runs never block.

use std::cell::Cell;
use std::time::Duration;

/// Something that can wait for a while
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&self, _duration: Duration) {}
}

/// Returns immediately but remembers how long it was asked to wait
#[derive(Debug, Default)]
pub struct RecordingPacer {
    total: Cell<Duration>,
    calls: Cell<u32>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested pauses
    pub fn total(&self) -> Duration {
        self.total.get()
    }

    /// Number of pauses requested
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&self, duration: Duration) {
        self.total.set(self.total.get() + duration);
        self.calls.set(self.calls.get() + 1);
    }
}
