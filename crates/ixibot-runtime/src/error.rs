//! Runtime error types.

use ixibot_command::DefinitionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while wiring or running the bot.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command definition was rejected.
    #[error("Invalid command definition: {0}")]
    Definition(#[from] DefinitionError),

    /// A command with the same name is already registered.
    #[error("Command already registered: {0}")]
    CommandExists(String),

    /// Reading input or writing a reply failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
