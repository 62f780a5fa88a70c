//! Access-control module
//!
//! Holds the auth state machine and its supporting pieces: the mode enum,
//! the keystroke entry buffer, the `*`-prefix command detector, the
//! retry/pacing policy and the non-blocking cooldown timer.

pub mod controller;
pub mod entry;
pub mod mode;
pub mod pacing;
pub mod policy;
pub mod prefix;

// Public re-exports
pub use controller::AuthController;
pub use entry::EntryBuffer;
pub use mode::AuthMode;
pub use pacing::Cooldown;
pub use policy::{AuthPolicy, PolicyValidationError};
pub use prefix::{Command, KeyAction, StarPrefix};
