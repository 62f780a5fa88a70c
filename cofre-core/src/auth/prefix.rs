//! `*`-prefix command detection
//!
//! The keypad has no dedicated menu key, so a two-key `*`-prefix
//! disambiguates commands from digit entry. The detector tracks only
//! whether the immediately preceding key was `*`; sequences longer than
//! two keys do not exist in the protocol.

use crate::types::Key;

/// Two-key commands recognized behind the `*` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `**` — cancel the current entry
    Cancel,
    /// `*#` — enter (or abort) the change-secret flow
    ChangeSecret,
    /// `*0` — request externally-signaled authorization
    ExternalAuth,
}

/// What a key press means once the prefix state is accounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A digit to accumulate (or ignore, depending on mode)
    Digit(char),
    /// `#` outside a prefix: evaluate/lock
    Submit,
    /// A completed two-key command
    Command(Command),
    /// `*` pressed: armed, awaiting the second key
    Prefix,
}

/// One-symbol-lookback parser for the `*`-prefix protocol
#[derive(Debug, Default)]
pub struct StarPrefix {
    armed: bool,
}

impl StarPrefix {
    /// Create a detector with no pending prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret the next key press, consuming any pending prefix
    pub fn interpret(&mut self, key: Key) -> KeyAction {
        if self.armed {
            self.armed = false;
            return match key {
                Key::Star => KeyAction::Command(Command::Cancel),
                Key::Hash => KeyAction::Command(Command::ChangeSecret),
                Key::Digit('0') => KeyAction::Command(Command::ExternalAuth),
                // The star is swallowed, the digit stands on its own
                Key::Digit(d) => KeyAction::Digit(d),
            };
        }

        match key {
            Key::Star => {
                self.armed = true;
                KeyAction::Prefix
            }
            Key::Hash => KeyAction::Submit,
            Key::Digit(d) => KeyAction::Digit(d),
        }
    }
}
