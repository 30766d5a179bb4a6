//! Platform abstraction for time sources.
//!
//! The reactive core never reads a clock on its own. Hosts sample a
//! [`Clock`] once per frame and hand the result to the scene, which keeps
//! frame-driven state such as tooltip timers deterministic under test.

/// Provides timing information for the frame loop.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
