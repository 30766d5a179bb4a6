//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides the concrete implementation of the [`Clock`]
//! abstraction defined in `beatframe-core`, and a [`StdRuntime`] bundle
//! that hosts use to drive the scene with one time sample per frame.

use std::fmt;
use std::time::{Duration, Instant};

use beatframe_core::{Clock, Runtime};

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// Convenience container bundling a reactive runtime with the standard clock.
///
/// Frame times are reported relative to the moment the bundle was created.
#[derive(Clone)]
pub struct StdRuntime {
    runtime: Runtime,
    clock: StdClock,
    started: Instant,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let clock = StdClock;
        Self {
            runtime: Runtime::new(),
            started: clock.now(),
            clock,
        }
    }

    /// Returns a handle to the reactive runtime.
    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    /// Returns the clock implementation.
    pub fn clock(&self) -> &StdClock {
        &self.clock
    }

    /// Samples the clock. Hosts call this once per frame.
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.clock.elapsed_millis(self.started))
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("runtime", &self.runtime)
            .field("started", &self.started)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}
