//! Deterministic simulation harness for the session coordination layer.
//!
//! Recording implementations of the Driver and classifier traits plus a
//! virtual-clock environment, so the same [`filament_app::Runtime`]
//! orchestration code runs in production and in reproducible tests.
//!
//! # Scenario Testing
//!
//! [`SessionFixture`] spawns a full runtime over in-memory channels; tests
//! feed scripted inputs and assert on the [`DriverCall`] record. Combined
//! with `#[tokio::test(start_paused = true)]`, timeout paths run instantly
//! and deterministically.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifiers;
pub mod fixture;
pub mod sim_driver;
pub mod sim_env;

pub use classifiers::{
    CountingClassifier, DelayedClassifier, FixedClassifier, StallingClassifier, TableClassifier,
};
pub use fixture::SessionFixture;
pub use sim_driver::{DriverCall, SimDriver, SimDriverError};
pub use sim_env::SimEnv;
