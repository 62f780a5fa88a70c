//! Error types for the cofre lockbox
//!
//! This module defines all error types used throughout the crate,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the cofre crate
#[derive(Error, Debug)]
pub enum CofreError {
    /// Errors related to secret validation
    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    /// Errors related to the persistent byte store
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Secret validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret too short: {len} digits, minimum is {min}")]
    TooShort { len: usize, min: usize },

    #[error("Secret too long: {len} digits, maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("Secret must contain only numeric digits")]
    NotNumeric,
}

/// Persistent byte-store operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Address {addr} is outside the {region}-byte secret region")]
    OutOfBounds { addr: usize, region: usize },

    #[error("Failed to read persistent storage: {message}")]
    ReadFailed { message: String },

    #[error("Failed to write persistent storage: {message}")]
    WriteFailed { message: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save configuration file: {path}")]
    SaveFailed { path: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CofreError>;
