//! Error types for command parsing and command definition.

use thiserror::Error;

/// Errors raised while turning a line of user input into a command event.
///
/// Every variant is a synchronous validation failure. None of them are fatal:
/// callers are expected to report the message back to the user and keep
/// accepting input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A `"` opened a token but was never closed.
    #[error("unterminated quote found in <{remainder}>")]
    UnterminatedQuote {
        /// Unparsed input starting at the opening quote.
        remainder: String,
    },

    /// A token matched no declared argument and no positional slot was free.
    #[error("unrecognized argument <{token}>")]
    UnrecognizedArgument {
        /// The offending token.
        token: String,
    },

    /// An argument received the wrong number of parameters.
    #[error("\"{name}\" requires {expected} parameter(s), got <{actual}>: {parameters:?}")]
    InvalidParameterCount {
        /// Name of the argument.
        name: String,
        /// Human readable expectation, e.g. `"exactly one"`.
        expected: &'static str,
        /// Number of parameters received.
        actual: usize,
        /// The parameters as received.
        parameters: Vec<String>,
    },

    /// A parameter could not be converted to the argument's type.
    #[error("\"{name}\" requires {expected} but got <{value}>")]
    InvalidParameterValue {
        /// Name of the argument.
        name: String,
        /// Description of the expected value.
        expected: String,
        /// The raw value.
        value: String,
    },

    /// No registered command matched the requested name.
    #[error("command \"{name}\" is not registered")]
    UnregisteredCommand {
        /// The command name parsed out of the input.
        name: String,
    },
}

impl CommandError {
    /// Creates an unrecognized argument error.
    pub fn unrecognized(token: impl Into<String>) -> Self {
        Self::UnrecognizedArgument {
            token: token.into(),
        }
    }

    /// Creates an invalid parameter count error.
    pub fn parameter_count(name: &str, expected: &'static str, parameters: &[String]) -> Self {
        Self::InvalidParameterCount {
            name: name.to_string(),
            expected,
            actual: parameters.len(),
            parameters: parameters.to_vec(),
        }
    }

    /// Creates an invalid parameter value error.
    pub fn parameter_value(
        name: &str,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidParameterValue {
            name: name.to_string(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Returns the argument name carried by parameter errors.
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::InvalidParameterCount { name, .. } | Self::InvalidParameterValue { name, .. } => {
                Some(name.as_str())
            }
            _ => None,
        }
    }
}

/// Result type for parse operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors raised while assembling a [`Command`](crate::Command) definition.
///
/// These indicate programming mistakes in the wiring code, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Command or argument name was empty.
    #[error("{what} name must not be empty")]
    EmptyName {
        /// What was being named (`"command"` or `"argument"`).
        what: &'static str,
    },

    /// Command or argument name contained whitespace or `=`.
    #[error("{what} name <{name}> must not contain whitespace or '='")]
    InvalidName {
        /// What was being named.
        what: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Two arguments share a long name.
    #[error("command \"{command}\" declares argument \"{name}\" more than once")]
    DuplicateName {
        /// Command being defined.
        command: String,
        /// Duplicated long name.
        name: String,
    },

    /// Two optional arguments share a short character.
    #[error("command \"{command}\" declares short option '-{short}' more than once")]
    DuplicateShort {
        /// Command being defined.
        command: String,
        /// Duplicated short character.
        short: char,
    },

    /// An argument tried to claim the help flag's long name or short char.
    #[error("command \"{command}\" cannot redefine the reserved help option ({reserved})")]
    ReservedHelp {
        /// Command being defined.
        command: String,
        /// The reserved spelling that was claimed.
        reserved: String,
    },

    /// Short option character is not usable as a flag.
    #[error("short option '{short}' of \"{name}\" must be a visible character other than '-', '=' and digits")]
    InvalidShort {
        /// Argument name.
        name: String,
        /// The rejected short character.
        short: char,
    },
}

/// Result type for command definition.
pub type DefinitionResult<T> = Result<T, DefinitionError>;
