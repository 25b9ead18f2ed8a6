//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{BotConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &BotConfig) -> ConfigResult<()> {
    validate_command_prefix(&config.command_prefix)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// The prefix must be non-empty and must not contain whitespace, since the
/// command name is split off at the first space.
fn validate_command_prefix(prefix: &str) -> ConfigResult<()> {
    if prefix.is_empty() {
        return Err(ConfigError::missing_field("command_prefix"));
    }

    if prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(format!(
            "Command prefix cannot contain whitespace: {prefix:?}"
        )));
    }

    Ok(())
}

/// Validates logging configuration.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if let Some(module) = logging.filters.keys().find(|m| m.trim().is_empty()) {
        return Err(ConfigError::invalid(format!(
            "Log filter module name cannot be blank: {module:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&BotConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = BotConfig {
            command_prefix: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_validate_prefix_with_space() {
        let config = BotConfig {
            command_prefix: "! ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_file_output_requires_path() {
        let mut config = BotConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some("ixibot.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_blank_filter_module() {
        let mut config = BotConfig::default();
        config.logging.filters.insert(" ".to_string(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }
}
