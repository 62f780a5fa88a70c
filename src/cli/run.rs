//! Interactive simulator command
//!
//! Drives the access-control core from the terminal: stdin characters are
//! the keypad, the 16x2 display and the indicator/latch state render as
//! text, and the secret region persists to a file between runs.

use cofre_core::auth::AuthController;
use cofre_core::config::toml_config;
use cofre_core::error::CofreError;
use cofre_core::hal::{InputSource, OutputSink};
use cofre_core::storage::{FileStorage, SecretStore};
use cofre_core::types::{Indicator, Key, Latch, DISPLAY_COLS};
use colored::Colorize;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Poll cadence of the simulator control loop
const TICK: Duration = Duration::from_millis(50);

/// Keypad input fed from a stdin reader thread
///
/// Digits, `*` and `#` become key events. The `f` character toggles the
/// simulated face-authentication signal; everything else is ignored.
struct TerminalInput {
    rx: Receiver<char>,
    face_authorized: bool,
    eof: bool,
}

impl TerminalInput {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for c in line.chars() {
                    if tx.send(c).is_err() {
                        return;
                    }
                }
            }
            // Channel closes on stdin EOF, ending the simulator
        });

        Self {
            rx,
            face_authorized: false,
            eof: false,
        }
    }

    fn is_eof(&self) -> bool {
        self.eof
    }
}

impl InputSource for TerminalInput {
    fn poll_key(&mut self) -> Option<Key> {
        loop {
            match self.rx.try_recv() {
                Ok(c) if c == 'f' || c == 'F' => {
                    self.face_authorized = !self.face_authorized;
                    let state = if self.face_authorized {
                        "authorized".green()
                    } else {
                        "not authorized".red()
                    };
                    println!("  face signal: {}", state);
                }
                Ok(c) => {
                    if let Some(key) = Key::from_char(c) {
                        return Some(key);
                    }
                    // Not a keypad character, skip it
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.eof = true;
                    return None;
                }
            }
        }
    }

    fn authorized(&mut self) -> bool {
        self.face_authorized
    }
}

/// Renders output-device commands in the terminal
#[derive(Default)]
struct TerminalSink;

impl OutputSink for TerminalSink {
    fn display(&mut self, line1: &str, line2: &str) {
        let border: String = "-".repeat(DISPLAY_COLS);
        println!("  +{}+", border);
        // Pad before coloring so the ANSI codes do not skew the width
        println!(
            "  |{}|",
            format!("{:<width$}", line1, width = DISPLAY_COLS).bold()
        );
        println!("  |{:<width$}|", line2, width = DISPLAY_COLS);
        println!("  +{}+", border);
    }

    fn clear_display(&mut self) {
        self.display("", "");
    }

    fn alert(&mut self, pulses: u32) {
        println!("  {}", format!("BEEP x{}", pulses).yellow());
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Success => println!("  {}", "o indicator: success".green()),
            Indicator::Failure => println!("  {}", "o indicator: failure".red()),
            Indicator::Off => println!("  {}", "o indicator: off".dimmed()),
        }
    }

    fn set_latch(&mut self, latch: Latch) {
        match latch {
            Latch::Open => println!("  {}", ">> LATCH OPEN <<".green().bold()),
            Latch::Close => println!("  {}", ">> LATCH CLOSED <<".red().bold()),
        }
    }
}

/// Run the interactive simulator until stdin closes
pub fn run_simulator() -> Result<(), CofreError> {
    let config = toml_config::load_or_default()?;
    let storage_path = config.effective_storage_path()?;
    let policy = config.effective_policy();

    let storage = FileStorage::open(&storage_path)?;
    let store = SecretStore::open(storage)?;
    let mut controller = AuthController::new(store, policy);

    let mut sink = TerminalSink;
    let mut input = TerminalInput::spawn();

    sink.display("HELLO", "TEAM!");
    println!();
    println!("Secret region: {}", storage_path.display());
    println!("Keys: digits, * and #. 'f' toggles the face signal. Ctrl-D quits.");
    println!();

    loop {
        controller.service(&mut input, &mut sink, Instant::now());
        if input.is_eof() {
            break;
        }
        std::thread::sleep(TICK);
    }

    println!();
    println!("Simulator stopped.");
    Ok(())
}
