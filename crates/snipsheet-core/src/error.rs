//! Error types for Snipsheet core.

use thiserror::Error;

/// Errors that can occur loading or exporting a sheet
#[derive(Error, Debug)]
pub enum SnipsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snippets file: {0}")]
    Snippets(#[from] serde_json::Error),

    #[error("Invalid sheet config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Refusing to read {path}: file too large ({size} bytes, max {max})")]
    TooLarge { path: String, size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, SnipsheetError>;
