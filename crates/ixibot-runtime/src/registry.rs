//! Shared command registry.
//!
//! Wraps a [`CommandRepository`] so that registration and parsing can happen
//! from different threads. Cloning the registry shares the same commands.

use std::sync::Arc;

use ixibot_command::builtin::add_role;
use ixibot_command::{BoxedEvent, CommandRepository, CommandResult, ErasedCommand};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// Repository behind a shared read/write lock.
pub type SharedRepository = Arc<RwLock<CommandRepository>>;

/// Thread-safe handle to the registered commands.
#[derive(Clone, Debug)]
pub struct CommandRegistry {
    repository: SharedRepository,
}

impl CommandRegistry {
    /// Creates an empty registry for `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            repository: Arc::new(RwLock::new(CommandRepository::new(prefix))),
        }
    }

    /// Creates an empty registry using the configured prefix.
    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.command_prefix.clone())
    }

    /// The underlying shared repository.
    pub fn repository(&self) -> SharedRepository {
        Arc::clone(&self.repository)
    }

    /// The command prefix.
    pub fn prefix(&self) -> String {
        self.repository.read().prefix().to_string()
    }

    /// Registers a command, failing if the name is taken.
    pub fn register(&self, command: impl ErasedCommand + 'static) -> RuntimeResult<()> {
        let name = command.name().to_string();
        let mut repository = self.repository.write();
        if !repository.register(command) {
            return Err(RuntimeError::CommandExists(name));
        }
        info!(command = %name, "Registered command");
        Ok(())
    }

    /// Registers every command shipped with `ixibot-command`.
    pub fn register_builtins(&self) -> RuntimeResult<()> {
        self.register(add_role()?)
    }

    /// Removes the command called `name`.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.repository.write().unregister_name(name);
        if removed {
            info!(command = %name, "Unregistered command");
        }
        removed
    }

    /// Returns `true` if `line` carries the command prefix.
    pub fn is_command(&self, line: &str) -> bool {
        self.repository.read().is_command(line)
    }

    /// Parses `line` into an event.
    pub fn parse(&self, line: &str) -> CommandResult<BoxedEvent> {
        let repository = self.repository.read();
        let result = repository.parse(line);
        if let Err(error) = &result {
            debug!(%error, "Command rejected");
        }
        result
    }

    /// Help text for the command named in `line`.
    pub fn help_message(&self, line: &str) -> Option<String> {
        self.repository.read().help_message(line)
    }

    /// Registered command names in registration order.
    pub fn command_names(&self) -> Vec<String> {
        self.repository
            .read()
            .command_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.repository.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.repository.read().is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixibot_command::CommandError;
    use ixibot_command::builtin::RoleReactionEvent;

    #[test]
    fn test_register_builtins() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        registry.register_builtins().unwrap();
        assert_eq!(registry.command_names(), vec!["add_role"]);
        assert_eq!(registry.prefix(), ".");
    }

    #[test]
    fn test_register_duplicate_fails() {
        let registry = CommandRegistry::new("!");
        registry.register_builtins().unwrap();
        let err = registry.register_builtins().unwrap_err();
        assert!(matches!(err, RuntimeError::CommandExists(name) if name == "add_role"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clones_share_commands() {
        let registry = CommandRegistry::new("!");
        let other = registry.clone();
        registry.register_builtins().unwrap();
        assert_eq!(other.len(), 1);
        assert!(other.unregister("add_role"));
        assert!(registry.is_empty());
        assert!(!registry.unregister("add_role"));
    }

    #[test]
    fn test_parse_through_registry() {
        let registry = CommandRegistry::new("!");
        registry.register_builtins().unwrap();

        assert!(registry.is_command("!add_role"));
        assert!(!registry.is_command("add_role"));

        let event = registry.parse("!add_role -A 1 2 x 3").unwrap();
        let event = event.downcast_ref::<RoleReactionEvent>().unwrap();
        assert!(event.is_verify_add());

        assert!(matches!(
            registry.parse("!nope"),
            Err(CommandError::UnregisteredCommand { .. })
        ));
        assert!(registry.help_message("!add_role").is_some());
        assert!(registry.help_message("!nope").is_none());
    }
}
