//! Access-control state machine
//!
//! `AuthController` owns the flow state and routes every incoming key or
//! external-authorization sample: it consults the secret store, drives the
//! entry buffer and emits display/alert/indicator/latch commands. All state
//! lives in explicit fields on the controller instance; helpers receive it
//! by reference.

use crate::auth::entry::EntryBuffer;
use crate::auth::mode::AuthMode;
use crate::auth::pacing::Cooldown;
use crate::auth::policy::AuthPolicy;
use crate::auth::prefix::{Command, KeyAction, StarPrefix};
use crate::hal::{InputSource, OutputSink};
use crate::storage::{ByteStorage, SecretStore};
use crate::types::{Indicator, Key, Latch, SecretCode, MIN_SECRET_LEN};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Orchestrator of the lockbox access-control flow
pub struct AuthController<S: ByteStorage> {
    store: SecretStore<S>,
    entry: EntryBuffer,
    mode: AuthMode,
    prefix: StarPrefix,
    policy: AuthPolicy,
    poll_failures: u32,
    latch_open: bool,
    hold: Cooldown,
    poll_gate: Cooldown,
    prompt_dirty: bool,
    indicator_lit: bool,
}

impl<S: ByteStorage> AuthController<S> {
    /// Create a controller in `Idle` over an already-loaded secret store
    pub fn new(store: SecretStore<S>, policy: AuthPolicy) -> Self {
        Self {
            store,
            entry: EntryBuffer::new(),
            mode: AuthMode::Idle,
            prefix: StarPrefix::new(),
            policy,
            poll_failures: 0,
            latch_open: false,
            hold: Cooldown::new(),
            poll_gate: Cooldown::new(),
            prompt_dirty: true,
            indicator_lit: false,
        }
    }

    /// One iteration of the cooperative polling loop
    ///
    /// Renders the idle prompt once any feedback hold has expired,
    /// dispatches at most one key event, and samples the external
    /// authorization signal while it is awaited. Keys arriving during a
    /// feedback hold are processed, not dropped.
    pub fn service(
        &mut self,
        input: &mut impl InputSource,
        out: &mut impl OutputSink,
        now: Instant,
    ) {
        if self.prompt_dirty && !self.hold.active(now) {
            self.render_prompt(out);
        }

        if let Some(key) = input.poll_key() {
            self.handle_key(key, out, now);
        }

        if self.mode == AuthMode::ExternalAuthPending && !self.poll_gate.active(now) {
            let authorized = input.authorized();
            self.handle_authorization(authorized, out, now);
            self.poll_gate.arm(now, self.policy.poll_interval());
        }
    }

    /// Route one debounced key press
    pub fn handle_key(&mut self, key: Key, out: &mut impl OutputSink, now: Instant) {
        if self.mode == AuthMode::ExternalAuthPending {
            // Only the signal itself or its timeout leaves this mode
            debug!("Keypad input ignored while external authorization pending");
            return;
        }

        match self.prefix.interpret(key) {
            KeyAction::Prefix => {}
            KeyAction::Digit(digit) => self.handle_digit(digit, out, now),
            KeyAction::Submit => self.handle_submit(out, now),
            KeyAction::Command(command) => self.handle_command(command, out, now),
        }
    }

    /// Process one sample of the external authorization signal
    pub fn handle_authorization(
        &mut self,
        authorized: bool,
        out: &mut impl OutputSink,
        now: Instant,
    ) {
        if self.mode != AuthMode::ExternalAuthPending {
            return;
        }

        if authorized {
            info!("External authorization granted, opening latch");
            self.poll_failures = 0;
            self.reload_secret();
            self.entry.reset();
            self.open_latch(out, now, ("FACE RECOGNIZED", "SAFE OPEN"));
            return;
        }

        self.poll_failures += 1;
        debug!(
            failures = self.poll_failures,
            cap = self.policy.max_poll_failures,
            "External authorization not granted"
        );

        if self.poll_failures > self.policy.max_poll_failures {
            warn!("External authorization timed out, falling back to keypad entry");
            self.poll_failures = 0;
            self.reload_secret();
            self.entry.reset();
            self.set_mode(AuthMode::Idle);
            self.feedback(out, now, ("TIMED OUT", "ENTER CODE"));
        }
    }

    fn handle_digit(&mut self, digit: char, out: &mut impl OutputSink, now: Instant) {
        if !self.mode.accepts_digits() {
            debug!(mode = %self.mode, "Digit ignored");
            return;
        }

        if self.entry.append(digit) {
            // Echo the accumulated entry under the prompt line
            let (line1, _) = self.mode.prompt();
            out.display(line1, self.entry.digits());
        } else {
            warn!(mode = %self.mode, "Entry exceeded maximum length");
            self.entry.reset();
            self.feedback(out, now, ("MAX 6 DIGITS", "TRY AGAIN"));
        }
    }

    fn handle_submit(&mut self, out: &mut impl OutputSink, now: Instant) {
        match self.mode {
            AuthMode::Idle => {
                if self.store.compare(self.entry.digits()) {
                    info!("Secret accepted, opening latch");
                    self.entry.reset();
                    self.open_latch(out, now, ("CODE ACCEPTED", "SAFE OPEN"));
                } else {
                    warn!("Wrong secret entered");
                    self.entry.reset();
                    self.failure_feedback(out);
                    self.feedback(out, now, ("WRONG CODE", "TRY AGAIN"));
                }
            }
            AuthMode::Unlocked => {
                info!("Locking latch");
                self.entry.reset();
                out.set_latch(Latch::Close);
                self.latch_open = false;
                self.success_feedback(out);
                self.set_mode(AuthMode::Idle);
                self.feedback(out, now, ("SAFE LOCKED", ""));
            }
            AuthMode::ConfirmingOldSecret => {
                if self.store.compare(self.entry.digits()) {
                    info!("Current secret confirmed, awaiting new secret");
                    self.entry.reset();
                    self.success_feedback(out);
                    self.set_mode(AuthMode::EnteringNewSecret);
                } else {
                    warn!("Current secret mismatch, change-secret flow aborted");
                    self.entry.reset();
                    self.failure_feedback(out);
                    self.set_mode(AuthMode::Idle);
                    self.feedback(out, now, ("WRONG CODE", "TRY AGAIN"));
                }
            }
            AuthMode::EnteringNewSecret => self.commit_new_secret(out, now),
            AuthMode::ExternalAuthPending => {}
        }
    }

    fn commit_new_secret(&mut self, out: &mut impl OutputSink, now: Instant) {
        if self.entry.len() < MIN_SECRET_LEN {
            warn!(len = self.entry.len(), "New secret below minimum length");
            self.entry.reset();
            self.feedback(out, now, ("MIN 4 DIGITS", "TRY AGAIN"));
            return;
        }

        let code = match SecretCode::new(self.entry.digits().to_string()) {
            Ok(code) => code,
            Err(e) => {
                // The entry buffer bounds make this unreachable; recover anyway
                warn!("New secret rejected: {}", e);
                self.entry.reset();
                self.feedback(out, now, ("INVALID CODE", "TRY AGAIN"));
                return;
            }
        };

        self.entry.reset();
        self.set_mode(AuthMode::Idle);

        match self.store.replace(code) {
            Ok(()) => {
                info!("Secret updated");
                self.success_feedback(out);
                self.feedback(out, now, ("CODE UPDATED", ""));
            }
            Err(e) => {
                // The new secret stays active in memory; persistence is degraded
                warn!("Secret updated but not persisted: {}", e);
                self.failure_feedback(out);
                self.feedback(out, now, ("CODE UPDATED", "NOT SAVED!"));
            }
        }
    }

    fn handle_command(&mut self, command: Command, out: &mut impl OutputSink, now: Instant) {
        match command {
            Command::Cancel => self.cancel_entry(out),
            Command::ChangeSecret => match self.mode {
                AuthMode::Unlocked => {
                    info!("Entering change-secret flow");
                    self.entry.reset();
                    self.set_mode(AuthMode::ConfirmingOldSecret);
                }
                AuthMode::Idle => {
                    debug!("Change-secret refused while locked");
                    self.feedback(out, now, ("OPEN SAFE FIRST", "TO CHANGE CODE"));
                }
                AuthMode::ConfirmingOldSecret | AuthMode::EnteringNewSecret => {
                    self.cancel_entry(out)
                }
                AuthMode::ExternalAuthPending => {}
            },
            Command::ExternalAuth => match self.mode {
                AuthMode::Idle if !self.latch_open => {
                    info!("External authorization requested");
                    self.entry.reset();
                    self.poll_failures = 0;
                    self.poll_gate.clear();
                    self.set_mode(AuthMode::ExternalAuthPending);
                }
                // Inside an entry sub-flow a starred digit is just the digit
                AuthMode::ConfirmingOldSecret | AuthMode::EnteringNewSecret => {
                    self.handle_digit('0', out, now)
                }
                _ => debug!(mode = %self.mode, "External authorization request ignored"),
            },
        }
    }

    fn cancel_entry(&mut self, out: &mut impl OutputSink) {
        info!("Entry cancelled");
        self.entry.reset();
        self.hold.clear();
        out.clear_display();

        // Cancel lands on whichever mode matches the physical latch state
        let target = if self.latch_open {
            AuthMode::Unlocked
        } else {
            AuthMode::Idle
        };
        self.set_mode(target);
    }

    fn open_latch(&mut self, out: &mut impl OutputSink, now: Instant, message: (&str, &str)) {
        out.set_latch(Latch::Open);
        self.latch_open = true;
        self.success_feedback(out);
        self.set_mode(AuthMode::Unlocked);
        self.feedback(out, now, message);
    }

    fn reload_secret(&mut self) {
        // Discard any stale in-memory secret in favor of the persisted copy
        if let Err(e) = self.store.load() {
            warn!("Failed to reload persisted secret: {}", e);
        }
    }

    fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "Mode transition");
        }
        self.mode = mode;
        self.prompt_dirty = true;
    }

    /// Show a feedback message and hold it for the configured duration
    fn feedback(&mut self, out: &mut impl OutputSink, now: Instant, message: (&str, &str)) {
        out.display(message.0, message.1);
        self.hold.arm(now, self.policy.message_hold());
        self.prompt_dirty = true;
    }

    fn success_feedback(&mut self, out: &mut impl OutputSink) {
        out.alert(1);
        out.set_indicator(Indicator::Success);
        self.indicator_lit = true;
    }

    fn failure_feedback(&mut self, out: &mut impl OutputSink) {
        out.alert(self.policy.alert_pulses);
        out.set_indicator(Indicator::Failure);
        self.indicator_lit = true;
    }

    fn render_prompt(&mut self, out: &mut impl OutputSink) {
        if self.indicator_lit {
            out.set_indicator(Indicator::Off);
            self.indicator_lit = false;
        }
        let (line1, line2) = self.mode.prompt();
        out.display(line1, line2);
        self.prompt_dirty = false;
    }

    /// Current flow mode
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// True when the latch is physically open
    pub fn is_latch_open(&self) -> bool {
        self.latch_open
    }

    /// Consecutive failed external-authorization polls so far
    pub fn poll_failures(&self) -> u32 {
        self.poll_failures
    }

    /// Read access to the secret store
    pub fn store(&self) -> &SecretStore<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{RecordingSink, ScriptedInput, SinkEvent};
    use crate::storage::MemoryStorage;

    fn controller() -> AuthController<MemoryStorage> {
        let store = SecretStore::open(MemoryStorage::new()).unwrap();
        AuthController::new(store, AuthPolicy::default())
    }

    #[test]
    fn test_initial_state() {
        let controller = controller();

        assert_eq!(controller.mode(), AuthMode::Idle);
        assert!(!controller.is_latch_open());
        assert_eq!(controller.poll_failures(), 0);
    }

    #[test]
    fn test_first_service_renders_idle_prompt() {
        let mut controller = controller();
        let mut input = ScriptedInput::new();
        let mut sink = RecordingSink::new();

        controller.service(&mut input, &mut sink, Instant::now());

        assert_eq!(
            sink.events,
            vec![SinkEvent::Display("ENTER CODE".to_string(), String::new())]
        );
    }

    #[test]
    fn test_digits_echo_under_prompt() {
        let mut controller = controller();
        let mut sink = RecordingSink::new();
        let now = Instant::now();

        controller.handle_key(Key::Digit('4'), &mut sink, now);
        controller.handle_key(Key::Digit('2'), &mut sink, now);

        assert_eq!(
            sink.events.last(),
            Some(&SinkEvent::Display("ENTER CODE".to_string(), "42".to_string()))
        );
    }
}
