//! cofre - keypad lockbox simulator
//!
//! A terminal front end for the cofre access-control core: the keypad is
//! driven from stdin, the character display and indicators render in the
//! terminal, and the secret region persists to a file.

use clap::{Parser, Subcommand};
use cofre_core::{error::CofreError, init_logging};

mod cli;

#[derive(Parser)]
#[command(name = "cofre")]
#[command(about = "Keypad lockbox access control with a terminal simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive lockbox simulator
    Run,
    /// Erase the persisted secret region back to factory state
    Reset,
    /// Write a default configuration file and show the paths in use
    Setup,
}

fn main() {
    // Initialize logging
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => cli::run::run_simulator(),
        Commands::Reset => cli::reset::run_reset(),
        Commands::Setup => cli::setup::run_setup(),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let exit_code = match e {
                // Configuration errors (exit code 2)
                CofreError::Config(_) | CofreError::Toml(_) | CofreError::TomlSerialize(_) => 2,
                // Secret validation errors (exit code 2 - setup issues)
                CofreError::Secret(_) => 2,
                // Storage and IO errors (exit code 1 - runtime)
                CofreError::Storage(_) | CofreError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}
