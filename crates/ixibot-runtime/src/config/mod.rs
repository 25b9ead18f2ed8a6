//! Configuration for the ixibot runtime.
//!
//! Settings are layered with figment from built-in defaults, config files
//! and `IXIBOT_*` environment variables, then checked by
//! [`validate_config`].

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{BotConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SpanEventConfig};
pub use validation::validate_config;
