//! # ixibot
//!
//! Typed chat command parsing for bots.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌───────────────────┐     ┌───────────┐
//! │ ConsoleListener │────▶│ CommandRegistry │────▶│ Command<B>        │────▶│ EventSink │
//! │  (line input)   │     │  (shared lock)  │     │ (tokens → event)  │     │           │
//! └─────────────────┘     └─────────────────┘     └───────────────────┘     └───────────┘
//! ```
//!
//! - **Command**: a name, help text and an ordered list of arguments that fold
//!   tokens into an event builder
//! - **Repository**: the set of commands sharing one prefix
//! - **Runtime**: configuration, logging and the console loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ixibot::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = CommandRegistry::new(".");
//!     registry.register_builtins()?;
//!
//!     let event = registry.parse(".add_role -V <#1> 2 :smile: <@&3>")?;
//!     if let Some(event) = event.downcast_ref::<RoleReactionEvent>() {
//!         info!(?event, "Role reaction requested");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: read `ixibot.toml` (default)
//! - `yaml-config`: read `ixibot.yaml`
//! - `json-log`: JSON log lines

pub use ixibot_command as command;
pub use ixibot_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use ixibot::prelude::*;
/// ```
pub mod prelude {
    // Defining commands
    pub use ixibot_command::{
        Argument, ArgumentKind, Arity, BoxedEvent, Command, CommandBuilder, CommandEvent,
        CommandRepository, EntityRef, EventBuilder, Snowflake, parsers,
    };

    // Errors
    pub use ixibot_command::{CommandError, CommandResult, DefinitionError, DefinitionResult};

    // Built-in commands
    pub use ixibot_command::builtin::{RoleReactionEvent, RoleReactionEventBuilder, add_role};

    // Runtime
    pub use ixibot_runtime::{
        BotConfig, CommandRegistry, ConfigLoader, ConsoleListener, EventSink, ListenerSignal,
        LoggingBuilder, RuntimeError, RuntimeResult,
    };

    // Logging macros
    pub use ixibot_runtime::prelude::*;
}
