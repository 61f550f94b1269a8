//! Environment abstraction for deterministic testing.
//!
//! Decouples coordination logic from the system clock. Production code uses
//! [`SystemEnv`]; the simulation harness substitutes a virtual clock so
//! timeout paths run instantly and reproducibly.

use std::time::Duration;

/// Abstract environment providing time.
///
/// # Invariants
///
/// - `now()` never goes backwards within a single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`; simulation
    /// environments use virtual time.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// The only async method in the trait; used by runtime code to bound
    /// collaborator calls, never by the state machines themselves.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production environment backed by the system clock and the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
