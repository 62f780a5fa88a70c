//! Retry and pacing policy
//!
//! Tunables for user-feedback pacing and the external-authorization retry
//! cap. Defaults: a 3 s message hold, a 1 s pause between authorization
//! polls and a cap of 3 consecutive failed polls before falling back to
//! keypad entry.

use std::time::Duration;

/// Configuration for feedback pacing and external-authorization retries
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthPolicy {
    /// Seconds a feedback message is held on the display
    #[serde(default = "default_message_hold")]
    pub message_hold_secs: u64,

    /// Audible pulses emitted on a wrong-secret alert
    #[serde(default = "default_alert_pulses")]
    pub alert_pulses: u32,

    /// Seconds between external-authorization polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Consecutive failed polls tolerated before timing out to keypad entry
    #[serde(default = "default_max_poll_failures")]
    pub max_poll_failures: u32,
}

fn default_message_hold() -> u64 {
    3
}
fn default_alert_pulses() -> u32 {
    5
}
fn default_poll_interval() -> u64 {
    1
}
fn default_max_poll_failures() -> u32 {
    3
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            message_hold_secs: default_message_hold(),
            alert_pulses: default_alert_pulses(),
            poll_interval_secs: default_poll_interval(),
            max_poll_failures: default_max_poll_failures(),
        }
    }
}

impl AuthPolicy {
    /// Validate the entire policy
    ///
    /// Checks all fields against their valid ranges.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all fields are valid
    /// * `Err(PolicyValidationError)` with the first validation error encountered
    pub fn validate(&self) -> Result<(), PolicyValidationError> {
        self.validate_message_hold()?;
        self.validate_alert_pulses()?;
        self.validate_poll_interval()?;
        self.validate_max_poll_failures()?;
        Ok(())
    }

    /// Validate message_hold_secs is within range 1-30
    fn validate_message_hold(&self) -> Result<(), PolicyValidationError> {
        if self.message_hold_secs < 1 || self.message_hold_secs > 30 {
            Err(PolicyValidationError::InvalidMessageHold(
                self.message_hold_secs,
            ))
        } else {
            Ok(())
        }
    }

    /// Validate alert_pulses is within range 1-10
    fn validate_alert_pulses(&self) -> Result<(), PolicyValidationError> {
        if self.alert_pulses < 1 || self.alert_pulses > 10 {
            Err(PolicyValidationError::InvalidAlertPulses(self.alert_pulses))
        } else {
            Ok(())
        }
    }

    /// Validate poll_interval_secs is within range 1-60
    fn validate_poll_interval(&self) -> Result<(), PolicyValidationError> {
        if self.poll_interval_secs < 1 || self.poll_interval_secs > 60 {
            Err(PolicyValidationError::InvalidPollInterval(
                self.poll_interval_secs,
            ))
        } else {
            Ok(())
        }
    }

    /// Validate max_poll_failures is within range 1-10
    fn validate_max_poll_failures(&self) -> Result<(), PolicyValidationError> {
        if self.max_poll_failures < 1 || self.max_poll_failures > 10 {
            Err(PolicyValidationError::InvalidMaxPollFailures(
                self.max_poll_failures,
            ))
        } else {
            Ok(())
        }
    }

    /// Message hold as a duration
    pub fn message_hold(&self) -> Duration {
        Duration::from_secs(self.message_hold_secs)
    }

    /// Poll throttle as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Validation errors for AuthPolicy
#[derive(Debug, thiserror::Error)]
pub enum PolicyValidationError {
    #[error("message_hold_secs must be between 1 and 30, got: {0}")]
    InvalidMessageHold(u64),

    #[error("alert_pulses must be between 1 and 10, got: {0}")]
    InvalidAlertPulses(u32),

    #[error("poll_interval_secs must be between 1 and 60, got: {0}")]
    InvalidPollInterval(u64),

    #[error("max_poll_failures must be between 1 and 10, got: {0}")]
    InvalidMaxPollFailures(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = AuthPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.message_hold(), Duration::from_secs(3));
        assert_eq!(policy.poll_interval(), Duration::from_secs(1));
        assert_eq!(policy.max_poll_failures, 3);
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let mut policy = AuthPolicy::default();
        policy.message_hold_secs = 0;
        assert!(matches!(
            policy.validate(),
            Err(PolicyValidationError::InvalidMessageHold(0))
        ));

        let mut policy = AuthPolicy::default();
        policy.max_poll_failures = 11;
        assert!(matches!(
            policy.validate(),
            Err(PolicyValidationError::InvalidMaxPollFailures(11))
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        // An empty policy table deserializes to the defaults
        let policy: AuthPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, AuthPolicy::default());
    }
}
