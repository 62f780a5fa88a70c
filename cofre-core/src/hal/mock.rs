//! Mock input/output implementations for testing
//!
//! Provides a scripted input source and a command-recording output sink
//! so state-machine flows can be driven and asserted without hardware.

use crate::hal::{InputSource, OutputSink};
use crate::types::{Indicator, Key, Latch};
use std::collections::VecDeque;

/// Input source fed from a pre-scripted key sequence
///
/// The authorization signal replays a scripted sequence of samples and
/// then holds the last value (false when nothing was scripted).
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
    auth_samples: VecDeque<bool>,
    last_auth: bool,
}

impl ScriptedInput {
    /// Create an input source with no scripted keys or signals
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a key sequence from its keypad characters, e.g. `"012345#"`
    ///
    /// Characters outside the keypad alphabet are skipped.
    pub fn with_keys(sequence: &str) -> Self {
        let mut input = Self::new();
        input.push_keys(sequence);
        input
    }

    /// Append keys to the script
    pub fn push_keys(&mut self, sequence: &str) {
        self.keys.extend(sequence.chars().filter_map(Key::from_char));
    }

    /// Append authorization signal samples to the script
    pub fn push_auth_samples(&mut self, samples: &[bool]) {
        self.auth_samples.extend(samples.iter().copied());
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    fn authorized(&mut self) -> bool {
        if let Some(sample) = self.auth_samples.pop_front() {
            self.last_auth = sample;
        }
        self.last_auth
    }
}

/// A single command observed by the recording sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Display(String, String),
    ClearDisplay,
    Alert(u32),
    Indicator(Indicator),
    Latch(Latch),
}

/// Output sink that records every command for later assertion
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All latch commands observed, in order
    pub fn latch_commands(&self) -> Vec<Latch> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Latch(latch) => Some(*latch),
                _ => None,
            })
            .collect()
    }

    /// All indicator commands observed, in order
    pub fn indicator_commands(&self) -> Vec<Indicator> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Indicator(indicator) => Some(*indicator),
                _ => None,
            })
            .collect()
    }

    /// True when some display command contained the given text on either line
    pub fn displayed(&self, text: &str) -> bool {
        self.events.iter().any(|e| match e {
            SinkEvent::Display(l1, l2) => l1.contains(text) || l2.contains(text),
            _ => false,
        })
    }

    /// Number of audible alert commands observed
    pub fn alert_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Alert(_)))
            .count()
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.events.clear();
    }
}

impl OutputSink for RecordingSink {
    fn display(&mut self, line1: &str, line2: &str) {
        self.events
            .push(SinkEvent::Display(line1.to_string(), line2.to_string()));
    }

    fn clear_display(&mut self) {
        self.events.push(SinkEvent::ClearDisplay);
    }

    fn alert(&mut self, pulses: u32) {
        self.events.push(SinkEvent::Alert(pulses));
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        self.events.push(SinkEvent::Indicator(indicator));
    }

    fn set_latch(&mut self, latch: Latch) {
        self.events.push(SinkEvent::Latch(latch));
    }
}
