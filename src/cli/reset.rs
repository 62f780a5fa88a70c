//! Reset command implementation
//!
//! Erases the persisted secret region so the next run reseeds the
//! factory-default code.

use cofre_core::config::toml_config;
use cofre_core::error::CofreError;
use cofre_core::storage::{self, FileStorage};
use colored::Colorize;

/// Run the reset command
pub fn run_reset() -> Result<(), CofreError> {
    let config = toml_config::load_or_default()?;
    let storage_path = config.effective_storage_path()?;

    let mut file_storage = FileStorage::open(&storage_path)?;
    storage::erase_region(&mut file_storage)?;

    println!(
        "{} secret region erased: {}",
        "OK".green().bold(),
        storage_path.display()
    );
    println!("The factory-default code will be reseeded on the next run.");

    Ok(())
}
