//! Virtual-clock environment.

use std::time::Duration;

use filament_core::Environment;

/// Environment backed by the tokio clock.
///
/// Under `#[tokio::test(start_paused = true)]` the clock is virtual: sleeps
/// auto-advance the moment the runtime is otherwise idle, so timeout paths
/// run instantly and deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimEnv;

impl SimEnv {
    /// Create a new simulation environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SimEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
