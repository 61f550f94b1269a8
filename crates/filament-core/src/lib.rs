//! Core domain types for the wallet session coordination layer.
//!
//! This crate defines the vocabulary shared by the state machines in
//! `filament-app` and their collaborators: session lifecycle states, screen
//! selections, navigation intents, channel snapshots, and the traits at the
//! boundary to external subsystems (address classification, time).
//!
//! Everything here is presentation-free: a screen is a value, not a view,
//! so the mapping from session state to screen is unit-testable without
//! constructing any UI object.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod channel;
pub mod classify;
pub mod env;
pub mod error;
pub mod intent;
pub mod screen;
pub mod session;

pub use channel::{ChannelId, ChannelUpdate, ReminderConfiguration, ReminderRequest, ReminderThreshold};
pub use classify::AddressClassifier;
pub use env::{Environment, SystemEnv};
pub use error::{ClassifyError, ReminderConfigError};
pub use intent::{Intent, PaymentKind};
pub use screen::{ModalScreen, ScreenSelection, screen_for};
pub use session::{SessionHost, SessionState};
