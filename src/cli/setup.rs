//! Setup command implementation
//!
//! Writes a default configuration file and reports the paths the
//! simulator will use.

use cofre_core::config::{toml_config, TomlConfig};
use cofre_core::error::CofreError;
use colored::Colorize;
use std::io::{self, Write};

/// Run the setup command
pub fn run_setup() -> Result<(), CofreError> {
    println!("{}", "cofre setup".bold());
    println!("===========");
    println!();

    let config_path = toml_config::get_config_path()?;

    // Check if already configured
    if let Ok(true) = toml_config::config_exists() {
        println!("Existing configuration detected at {}", config_path.display());
        if !prompt_yes_no("Overwrite with defaults? (y/N)")? {
            println!("Setup cancelled.");
            return Ok(());
        }
        println!();
    }

    let config = TomlConfig::default();
    config.to_file(&config_path)?;

    println!("{} wrote {}", "OK".green().bold(), config_path.display());
    println!(
        "Secret region: {}",
        config.effective_storage_path()?.display()
    );
    println!();
    println!("You can now use:");
    println!("  cofre run    - start the interactive simulator");
    println!("  cofre reset  - erase the persisted secret region");

    Ok(())
}

/// Ask a yes/no question on stdin, defaulting to no
fn prompt_yes_no(question: &str) -> Result<bool, CofreError> {
    print!("{} ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
