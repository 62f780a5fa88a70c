//! Access-control mode state
//!
//! Defines the state machine modes for the lockbox flow and the idle
//! prompt shown on the display while a mode is waiting for input.

/// Current step of the access-control flow
///
/// Exactly one mode is active at a time. The machine starts in `Idle`
/// and runs forever; there is no terminal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Awaiting secret entry, latch closed
    #[default]
    Idle,

    /// Latch open, awaiting the lock command
    Unlocked,

    /// Change-secret flow: re-entry of the current secret required
    ConfirmingOldSecret,

    /// Change-secret flow: new secret being entered
    EnteringNewSecret,

    /// Waiting on the external face-authentication signal
    ExternalAuthPending,
}

impl AuthMode {
    /// Two-line idle prompt shown while this mode waits for input
    pub fn prompt(&self) -> (&'static str, &'static str) {
        match self {
            AuthMode::Idle => ("ENTER CODE", ""),
            AuthMode::Unlocked => ("PRESS #", "TO LOCK"),
            AuthMode::ConfirmingOldSecret => ("ENTER OLD CODE", ""),
            AuthMode::EnteringNewSecret => ("ENTER NEW CODE", ""),
            AuthMode::ExternalAuthPending => ("SCANNING FACE", ""),
        }
    }

    /// True when the mode accumulates digits into the entry buffer
    pub fn accepts_digits(&self) -> bool {
        matches!(
            self,
            AuthMode::Idle | AuthMode::ConfirmingOldSecret | AuthMode::EnteringNewSecret
        )
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Idle => write!(f, "idle"),
            AuthMode::Unlocked => write!(f, "unlocked"),
            AuthMode::ConfirmingOldSecret => write!(f, "confirming old secret"),
            AuthMode::EnteringNewSecret => write!(f, "entering new secret"),
            AuthMode::ExternalAuthPending => write!(f, "external auth pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_idle() {
        assert_eq!(AuthMode::default(), AuthMode::Idle);
    }

    #[test]
    fn test_entry_modes_accept_digits() {
        assert!(AuthMode::Idle.accepts_digits());
        assert!(AuthMode::ConfirmingOldSecret.accepts_digits());
        assert!(AuthMode::EnteringNewSecret.accepts_digits());
        assert!(!AuthMode::Unlocked.accepts_digits());
        assert!(!AuthMode::ExternalAuthPending.accepts_digits());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AuthMode::Idle), "idle");
        assert_eq!(format!("{}", AuthMode::Unlocked), "unlocked");
        assert_eq!(
            format!("{}", AuthMode::ExternalAuthPending),
            "external auth pending"
        );
    }
}
