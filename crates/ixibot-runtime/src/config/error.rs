//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file extension is unknown or its format feature is disabled.
    #[error("unsupported configuration format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// A source failed to parse, or the merged sources do not fit [`BotConfig`](super::BotConfig).
    #[error("failed to read configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// A value parsed but is not acceptable.
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    /// A required value is empty or absent.
    #[error("missing configuration value: {field}")]
    MissingField { field: &'static str },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
