//! Console Bot Example
//!
//! Reads one command per line from stdin, parses it with the built-in
//! commands and logs the resulting events.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package console-bot -- --prefix '!'
//! !add_role -V <#1> 2 :smile: <@&3>
//! !add_role --help
//! quit
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ixibot::command::BoxedEvent;
use ixibot::command::builtin::RoleReactionEvent;
use ixibot::runtime::config::{ConfigLoader, validate_config};
use ixibot::runtime::{CommandRegistry, ConsoleListener, EventSink, ListenerSignal, logging};
use tracing::{info, warn};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "console-bot")]
#[command(about = "Parse bot commands typed on the console")]
#[command(version)]
struct Args {
    /// Configuration file (default: search ixibot.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile, e.g. "dev" loads ixibot.dev.toml
    #[arg(long)]
    profile: Option<String>,

    /// Override the command prefix
    #[arg(long)]
    prefix: Option<String>,
}

// ============================================================================
// Event Sink
// ============================================================================

/// Logs every event it receives.
#[derive(Default)]
struct LoggingSink {
    received: usize,
}

impl EventSink for LoggingSink {
    fn dispatch(&mut self, event: BoxedEvent) {
        self.received += 1;

        if !event.is_valid() {
            warn!(event = event.event_name(), "Event is missing required arguments");
            return;
        }

        match event.downcast_ref::<RoleReactionEvent>() {
            Some(reaction) => info!(
                channel = ?reaction.channel(),
                message = ?reaction.message_id(),
                emoji = ?reaction.emoji_name(),
                role = ?reaction.role(),
                verify_add = reaction.is_verify_add(),
                verify_remove = reaction.is_verify_remove(),
                "Role reaction requested"
            ),
            None => info!(?event, "Received event"),
        }
    }

    fn signal(&mut self, signal: ListenerSignal) {
        info!(?signal, received = self.received, "Listener signalled");
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new().with_current_dir();
    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    if let Some(prefix) = &args.prefix {
        loader = loader.set("command_prefix", prefix);
    }

    let config = loader.load().context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;
    logging::init_from_config(&config.logging);

    let registry = CommandRegistry::from_config(&config);
    registry.register_builtins()?;
    info!(
        prefix = %config.command_prefix,
        commands = ?registry.command_names(),
        "Ready, type 'quit' to exit"
    );

    let listener = ConsoleListener::from_registry(&registry);
    let dispatched = listener.run(io::stdin().lock(), io::stdout(), LoggingSink::default())?;
    info!(dispatched, "Console bot stopped");

    Ok(())
}
