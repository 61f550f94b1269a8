//! Session coordination layer for the wallet shell.
//!
//! Pure state machines and a generic runtime that mediate between the
//! backend connectivity subsystem and the presentation layer, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`StateCoordinator`]: maps session-state transitions to screen
//!   selections, gates and replays navigation intents, escalates fatal state
//! - [`Router`]: single-slot pending navigation intent
//! - [`ScanDeduplicator`]: rejects immediately repeated scanner input
//! - [`ReminderScheduler`]: force-close expiry reminders per channel
//! - [`Driver`]: trait for platform-specific presentation and notification I/O
//! - [`Runtime`]: serialized orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod coordinator;
mod dedupe;
mod driver;
mod event;
mod reminders;
mod router;
mod runtime;

pub use action::{CoordAction, ReminderAction};
pub use coordinator::StateCoordinator;
pub use dedupe::ScanDeduplicator;
pub use driver::Driver;
pub use event::CoordEvent;
pub use reminders::ReminderScheduler;
pub use router::Router;
pub use runtime::{
    DEFAULT_BLOCK_INTERVAL, DEFAULT_CLASSIFY_TIMEOUT, Runtime, SessionConfig, SessionStreams,
};
