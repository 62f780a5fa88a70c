//! Non-blocking pacing timer
//!
//! Pacing user feedback with blocking sleeps would drop any key pressed
//! during a hold. `Cooldown` keeps the pacing durations but lets the
//! polling loop keep servicing input: the loop asks whether the cooldown
//! is still active instead of sleeping through it.

use std::time::{Duration, Instant};

/// A deadline-based cooldown checked by the polling loop
#[derive(Debug, Default, Clone, Copy)]
pub struct Cooldown {
    until: Option<Instant>,
}

impl Cooldown {
    /// Create an inactive cooldown
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the cooldown for the given duration from `now`
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    /// True while the cooldown has not yet expired
    pub fn active(&self, now: Instant) -> bool {
        match self.until {
            Some(deadline) => now < deadline,
            None => false,
        }
    }

    /// Disarm without waiting for expiry
    pub fn clear(&mut self) {
        self.until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cooldown_is_inactive() {
        let cooldown = Cooldown::new();
        assert!(!cooldown.active(Instant::now()));
    }

    #[test]
    fn test_armed_cooldown_expires_at_deadline() {
        let start = Instant::now();
        let mut cooldown = Cooldown::new();
        cooldown.arm(start, Duration::from_secs(3));

        assert!(cooldown.active(start));
        assert!(cooldown.active(start + Duration::from_secs(2)));
        assert!(!cooldown.active(start + Duration::from_secs(3)));
        assert!(!cooldown.active(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_clear_disarms_immediately() {
        let start = Instant::now();
        let mut cooldown = Cooldown::new();
        cooldown.arm(start, Duration::from_secs(3));
        cooldown.clear();

        assert!(!cooldown.active(start));
    }
}
