//! Configuration module
//!
//! Handles loading and saving lockbox configuration from TOML files.

pub mod toml_config;

pub use toml_config::TomlConfig;
