//! Error types for the Landing router

use landing_pattern::CompileError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Landing error type
#[derive(Error, Debug)]
pub enum LandingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid control file pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Upload '{upload}' has an invalid pattern: {source}")]
    Compile {
        upload: String,
        #[source]
        source: CompileError,
    },

    #[error("Upload not found: {0}")]
    UploadNotFound(String),

    #[error("Source directory {}: {reason}", path.display())]
    SourceDir { path: PathBuf, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LandingError>;
