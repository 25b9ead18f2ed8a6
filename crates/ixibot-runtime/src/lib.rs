//! ixibot Runtime - the ambient layer around the command parser.
//!
//! This crate provides:
//! - Layered configuration (`BotConfig`, `ConfigLoader`)
//! - Logging setup (`LoggingBuilder`, `init_from_config`)
//! - A thread-safe command registry (`CommandRegistry`)
//! - A line-oriented console front end (`ConsoleListener`)
//!
//! ```ignore
//! use ixibot_runtime::{CommandRegistry, ConsoleListener, config, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = config::load_config()?;
//!     config::validate_config(&config)?;
//!     logging::init_from_config(&config.logging);
//!
//!     let registry = CommandRegistry::from_config(&config);
//!     registry.register_builtins()?;
//!
//!     ConsoleListener::from_registry(&registry).run(
//!         std::io::stdin().lock(),
//!         std::io::stdout(),
//!         |event: ixibot_command::BoxedEvent| tracing::info!(?event, "Received"),
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod registry;

pub use config::{BotConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig, Profile};
pub use console::{ConsoleListener, EventSink, ListenerSignal, QUIT_COMMAND};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents, init_from_config};
pub use registry::{CommandRegistry, SharedRepository};

// Downstream crates log through the same `tracing` version.
pub use tracing;
pub use tracing_subscriber;

/// Logging macros, so handlers need only `use ixibot_runtime::prelude::*`.
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
