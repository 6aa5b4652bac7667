use std::io;
use std::path::PathBuf;

/// Errors that can occur during meson-runner operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not find the `{name}` executable in PATH or the usual install locations")]
    ToolNotFound { name: String },

    #[error("The meson.build file wasn't found in {0}")]
    NoBuildDescriptor(PathBuf),

    #[error("no build directories found")]
    NoBuildDirectoriesFound,

    #[error("No build directory was selected out of {candidates} candidates")]
    NoBuildDirectorySelected { candidates: usize },

    #[error("Invalid flag name `{0}`: only lowercase letters, digits and hyphens are allowed")]
    InvalidFlagName(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for meson-runner operations
pub type Result<T> = std::result::Result<T, Error>;
