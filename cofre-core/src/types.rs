//! Type definitions and wrappers for secure data handling
//!
//! This module provides the keypad alphabet, output-device command types and
//! a type-safe wrapper for the secret code using the secrecy crate to
//! prevent accidental exposure in logs or debug output.

use crate::error::SecretError;
use secrecy::{ExposeSecret, Secret};

/// Minimum accepted secret length in digits
pub const MIN_SECRET_LEN: usize = 4;

/// Maximum accepted secret length in digits
pub const MAX_SECRET_LEN: usize = 6;

/// Factory-default secret seeded into uninitialized storage
pub const DEFAULT_SECRET: &str = "012345";

/// Display geometry of the character display (columns per line)
pub const DISPLAY_COLS: usize = 16;

/// A single debounced keypad symbol
///
/// The input collaborator is responsible for debouncing, so one physical
/// press is observed as exactly one `Key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A numeric key, `'0'..='9'`
    Digit(char),
    /// The `*` key (command prefix)
    Star,
    /// The `#` key (submit / lock)
    Hash,
}

impl Key {
    /// Map a raw character to a keypad symbol, if it is on the pad
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Key::Digit(c)),
            '*' => Some(Key::Star),
            '#' => Some(Key::Hash),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::Star => write!(f, "*"),
            Key::Hash => write!(f, "#"),
        }
    }
}

/// Indicator lamp command for the output collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Success lamp (green)
    Success,
    /// Failure lamp (red)
    Failure,
    /// All lamps off
    Off,
}

/// Latch actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    /// Drive the latch open
    Open,
    /// Drive the latch closed
    Close,
}

/// Wrapper for the numeric secret code that gates the latch
///
/// This type ensures the code is never accidentally logged or exposed
/// in debug output, and that every constructed value satisfies the
/// length and digit invariants.
#[derive(Clone, Debug)]
pub struct SecretCode(Secret<String>);

impl SecretCode {
    /// Create a new secret code, validating length bounds and digit content
    ///
    /// # Errors
    ///
    /// Returns `SecretError::TooShort`/`TooLong` when the length is outside
    /// `[MIN_SECRET_LEN, MAX_SECRET_LEN]`, or `SecretError::NotNumeric`
    /// when any character is not an ASCII digit.
    pub fn new(code: String) -> Result<Self, SecretError> {
        let len = code.len();
        if len < MIN_SECRET_LEN {
            return Err(SecretError::TooShort {
                len,
                min: MIN_SECRET_LEN,
            });
        }
        if len > MAX_SECRET_LEN {
            return Err(SecretError::TooLong {
                len,
                max: MAX_SECRET_LEN,
            });
        }
        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(SecretError::NotNumeric);
        }

        Ok(Self(Secret::new(code)))
    }

    /// The compiled-in factory default code
    pub fn factory_default() -> Self {
        Self(Secret::new(DEFAULT_SECRET.to_string()))
    }

    /// Expose the code value (use with caution!)
    ///
    /// This should only be called when mirroring the code into the
    /// persistent byte store.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Number of digits in the code
    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    /// True when the code holds no digits (never the case for validated codes)
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Exact-length, exact-content match against a candidate entry
    ///
    /// A candidate that is a true prefix of a longer code never matches.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.expose_secret() == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes_within_bounds() {
        for code in ["1234", "12345", "123456", "0000"] {
            assert!(SecretCode::new(code.to_string()).is_ok(), "code {}", code);
        }
    }

    #[test]
    fn test_too_short_code_rejected() {
        let result = SecretCode::new("123".to_string());
        assert_eq!(result.unwrap_err(), SecretError::TooShort { len: 3, min: 4 });
    }

    #[test]
    fn test_too_long_code_rejected() {
        let result = SecretCode::new("1234567".to_string());
        assert_eq!(result.unwrap_err(), SecretError::TooLong { len: 7, max: 6 });
    }

    #[test]
    fn test_non_digit_code_rejected() {
        let result = SecretCode::new("12a4".to_string());
        assert_eq!(result.unwrap_err(), SecretError::NotNumeric);
    }

    #[test]
    fn test_match_requires_exact_length_and_content() {
        let code = SecretCode::new("123456".to_string()).unwrap();

        assert!(code.matches("123456"));
        // Proper prefix must not match
        assert!(!code.matches("12345"));
        // Proper suffix must not match
        assert!(!code.matches("23456"));
        // Same-length permutation must not match
        assert!(!code.matches("123465"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_debug_output_redacts_code() {
        let code = SecretCode::new("4321".to_string()).unwrap();
        let debug = format!("{:?}", code);
        assert!(!debug.contains("4321"));
    }

    #[test]
    fn test_key_from_char() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit('7')));
        assert_eq!(Key::from_char('*'), Some(Key::Star));
        assert_eq!(Key::from_char('#'), Some(Key::Hash));
        assert_eq!(Key::from_char('x'), None);
    }
}
