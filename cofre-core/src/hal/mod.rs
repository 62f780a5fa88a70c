//! Hardware abstraction seams
//!
//! The controller talks to the physical lockbox exclusively through these
//! traits. Real implementations (keypad matrix, character display, latch
//! servo) live with the firmware glue; the simulator and the test doubles
//! in [`mock`] implement the same seams.

use crate::types::{Indicator, Key, Latch};

pub mod mock;

/// Source of debounced keypad symbols and the external authorization signal
///
/// `poll_key` must yield at most one symbol per physical press; holding a
/// key must not produce repeated events. The authorization signal comes
/// from the out-of-band face-authentication subsystem and is polled, not
/// event-pushed.
pub trait InputSource {
    /// Poll for the next key event, if any
    fn poll_key(&mut self) -> Option<Key>;

    /// Sample the external "authorized" signal
    fn authorized(&mut self) -> bool;
}

/// Sink for display, indicator, alert and latch commands
///
/// All commands are fire-and-forget from the controller's perspective.
pub trait OutputSink {
    /// Show two lines of text on the character display
    fn display(&mut self, line1: &str, line2: &str);

    /// Blank the character display
    fn clear_display(&mut self);

    /// Pulse the audible alert the given number of times
    fn alert(&mut self, pulses: u32);

    /// Set the indicator lamp
    fn set_indicator(&mut self, indicator: Indicator);

    /// Drive the latch actuator
    fn set_latch(&mut self, latch: Latch);
}
