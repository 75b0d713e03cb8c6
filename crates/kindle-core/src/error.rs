//! Error types for Kindle

use thiserror::Error;

/// The main error type for Kindle operations
#[derive(Debug, Error)]
pub enum KindleError {
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Render error: {0}")]
    RenderError(String),

    /// For user systems to report their own failures
    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("System '{system}' failed: {message}")]
    SystemFailed { system: String, message: String },
}

/// Result type alias for Kindle operations
pub type Result<T> = std::result::Result<T, KindleError>;

impl From<toml::de::Error> for KindleError {
    fn from(err: toml::de::Error) -> Self {
        KindleError::TomlParseError(err.to_string())
    }
}
