//! The registry of commands and the entry point for raw input lines.

use tracing::{debug, trace};

use crate::command::ErasedCommand;
use crate::error::{CommandError, CommandResult};
use crate::event::BoxedEvent;
use crate::split::{split_command, tokenize};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = ".";

/// Insertion-ordered set of commands sharing one prefix.
///
/// The repository is a plain value with no interior locking. Share it behind
/// a lock when registration and parsing happen on different threads.
pub struct CommandRepository {
    prefix: String,
    commands: Vec<Box<dyn ErasedCommand>>,
}

impl CommandRepository {
    /// Creates an empty repository recognising lines that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commands: Vec::new(),
        }
    }

    /// The configured command prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if `line` starts with the prefix.
    ///
    /// This is a pure string check; the command need not be registered.
    pub fn is_command(&self, line: &str) -> bool {
        line.starts_with(&self.prefix)
    }

    /// Registers a command.
    ///
    /// Returns `false` and leaves the repository unchanged if a command with
    /// the same name is already registered.
    pub fn register(&mut self, command: impl ErasedCommand + 'static) -> bool {
        self.register_boxed(Box::new(command))
    }

    /// Registers an already boxed command.
    pub fn register_boxed(&mut self, command: Box<dyn ErasedCommand>) -> bool {
        if self.find(command.name()).is_some() {
            debug!(command = command.name(), "Command already registered");
            return false;
        }
        debug!(command = command.name(), "Registered command");
        self.commands.push(command);
        true
    }

    /// Removes the command with the same name as `command`.
    pub fn unregister(&mut self, command: &dyn ErasedCommand) -> bool {
        self.unregister_name(command.name())
    }

    /// Removes the first command matching `name`.
    pub fn unregister_name(&mut self, name: &str) -> bool {
        match self.commands.iter().position(|c| c.matches(name)) {
            Some(index) => {
                self.commands.remove(index);
                debug!(command = name, "Unregistered command");
                true
            }
            None => false,
        }
    }

    /// Looks up a command by name.
    pub fn find(&self, name: &str) -> Option<&dyn ErasedCommand> {
        self.commands
            .iter()
            .find(|c| c.matches(name))
            .map(|c| c.as_ref())
    }

    /// Names of all registered commands in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parses a full input line into an event.
    ///
    /// The prefix is stripped if present, the remainder is split at the first
    /// space into the command name and its argument string, and the argument
    /// string is tokenized and handed to the matching command.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnregisteredCommand`] when no command matches, plus any
    /// tokenizer or command error.
    pub fn parse(&self, line: &str) -> CommandResult<BoxedEvent> {
        let (name, arguments) = self.split(line);
        let command = self
            .find(name)
            .ok_or_else(|| CommandError::UnregisteredCommand {
                name: name.to_string(),
            })?;
        let tokens = tokenize(arguments)?;
        trace!(command = name, ?tokens, "Dispatching command");
        command.parse_boxed(&tokens)
    }

    /// Help text of the command named in `line`, if it is registered.
    pub fn help_message(&self, line: &str) -> Option<String> {
        let (name, _) = self.split(line);
        self.find(name).map(|command| command.help_message())
    }

    fn split<'l>(&self, line: &'l str) -> (&'l str, &'l str) {
        let body = line.strip_prefix(self.prefix.as_str()).unwrap_or(line);
        split_command(body)
    }
}

impl Default for CommandRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl std::fmt::Debug for CommandRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRepository")
            .field("prefix", &self.prefix)
            .field("commands", &self.command_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::argument::Argument;
    use crate::command::Command;
    use crate::event::{CommandEvent, EventBuilder};
    use crate::parsers;

    #[derive(Debug, Clone, PartialEq)]
    struct Reaction {
        help: bool,
        valid: bool,
        verify: bool,
        channel: Option<String>,
        message: Option<i64>,
        emoji: Option<String>,
        role: Option<i64>,
    }

    impl CommandEvent for Reaction {
        fn event_name(&self) -> &'static str {
            "reaction"
        }

        fn is_help(&self) -> bool {
            self.help
        }

        fn is_valid(&self) -> bool {
            self.valid
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
            self
        }
    }

    #[derive(Debug)]
    struct ReactionBuilder(Reaction);

    impl Default for ReactionBuilder {
        fn default() -> Self {
            Self(Reaction {
                help: false,
                valid: true,
                verify: false,
                channel: None,
                message: None,
                emoji: None,
                role: None,
            })
        }
    }

    impl EventBuilder for ReactionBuilder {
        type Event = Reaction;

        fn help(mut self, help: bool) -> Self {
            self.0.help = help;
            self
        }

        fn valid(mut self, valid: bool) -> Self {
            self.0.valid = valid;
            self
        }

        fn build(self) -> Reaction {
            self.0
        }
    }

    fn add_role() -> Command<ReactionBuilder> {
        Command::builder("add_role")
            .about("Add a role reaction listener")
            .usage("add_role [options] <channel> <message id> <emoji> <role>")
            .argument(Argument::flag(
                "verify",
                'V',
                "Run verify checks",
                |mut b: ReactionBuilder, v| {
                    b.0.verify = v;
                    b
                },
            ))
            .argument(Argument::positional(
                "channel",
                "Channel",
                parsers::parse_string,
                |mut b: ReactionBuilder, v| {
                    b.0.channel = Some(v);
                    b
                },
            ))
            .argument(Argument::positional(
                "message",
                "Message",
                parsers::parse_i64,
                |mut b: ReactionBuilder, v| {
                    b.0.message = Some(v);
                    b
                },
            ))
            .argument(Argument::positional(
                "emoji",
                "Emoji",
                parsers::parse_string,
                |mut b: ReactionBuilder, v| {
                    b.0.emoji = Some(v);
                    b
                },
            ))
            .argument(Argument::positional(
                "role",
                "Role",
                parsers::parse_i64,
                |mut b: ReactionBuilder, v| {
                    b.0.role = Some(v);
                    b
                },
            ))
            .build()
            .unwrap()
    }

    fn ping() -> Command<ReactionBuilder> {
        Command::builder("ping").about("Ping").usage("ping").build().unwrap()
    }

    fn repository() -> CommandRepository {
        let mut repository = CommandRepository::default();
        assert!(repository.register(add_role()));
        repository
    }

    #[test]
    fn test_is_command() {
        let repository = CommandRepository::new("./");
        assert!(repository.is_command("./add_role --verify"));
        assert!(repository.is_command("./anything"));
        assert!(!repository.is_command(".add_role"));
        assert!(!repository.is_command("add_role"));
    }

    #[test]
    fn test_register_rejects_duplicate_names() {
        let mut repository = repository();
        assert!(!repository.register(add_role()));
        assert!(repository.register(ping()));
        assert_eq!(repository.command_names(), vec!["add_role", "ping"]);
    }

    #[test]
    fn test_unregister_by_name() {
        let mut repository = repository();
        assert!(repository.unregister_name("add_role"));
        assert!(!repository.unregister_name("add_role"));
        assert!(repository.is_empty());
    }

    #[test]
    fn test_unregister_by_command() {
        let mut repository = repository();
        repository.register(ping());
        assert!(repository.unregister(&ping()));
        assert_eq!(repository.command_names(), vec!["add_role"]);
    }

    #[test]
    fn test_parse_unregistered_command() {
        let err = repository().parse(".unknown_cmd").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnregisteredCommand {
                name: "unknown_cmd".to_string()
            }
        );
    }

    #[test]
    fn test_parse_end_to_end() {
        let event = repository()
            .parse(r#".add_role --verify=false #general 42 ":smile:" 7"#)
            .unwrap();
        let event = event.downcast_ref::<Reaction>().unwrap();
        assert!(!event.verify);
        assert!(!event.help);
        assert!(event.valid);
        assert_eq!(event.channel.as_deref(), Some("#general"));
        assert_eq!(event.message, Some(42));
        assert_eq!(event.emoji.as_deref(), Some(":smile:"));
        assert_eq!(event.role, Some(7));
    }

    #[test]
    fn test_builtin_add_role_accepts_names() {
        use crate::builtin::{self, RoleReactionEvent};
        use crate::snowflake::{EntityRef, Snowflake};

        let mut repository = CommandRepository::default();
        assert!(repository.register(builtin::add_role().unwrap()));
        let event = repository
            .parse(r#".add_role --verify=false #general 42 ":smile:" 7"#)
            .unwrap();
        let event = event.downcast_ref::<RoleReactionEvent>().unwrap();
        assert!(!event.is_verify());
        assert!(!event.is_help());
        assert!(event.is_valid());
        assert_eq!(event.channel(), Some(&EntityRef::from("general")));
        assert_eq!(event.message_id(), Some(Snowflake::new(42)));
        assert_eq!(event.emoji_name(), Some(":smile:"));
        assert_eq!(event.role_id(), Some(Snowflake::new(7)));

        let mut repository = CommandRepository::new("./");
        assert!(repository.register(builtin::add_role().unwrap()));
        let event = repository
            .parse(r#"./add_role --verify #general 123456789012345678 "party parrot" @Admins"#)
            .unwrap();
        let event = event.downcast_ref::<RoleReactionEvent>().unwrap();
        assert!(event.is_verify());
        assert!(event.is_valid());
        assert_eq!(event.channel(), Some(&EntityRef::from("general")));
        assert_eq!(event.message_id(), Some(Snowflake::new(123_456_789_012_345_678)));
        assert_eq!(event.emoji_name(), Some("party parrot"));
        assert_eq!(event.role(), Some(&EntityRef::from("Admins")));
    }

    #[test]
    fn test_parse_without_arguments() {
        let mut repository = repository();
        repository.register(ping());
        let event = repository.parse(".ping").unwrap();
        assert!(!event.is_help());
        assert!(event.is_valid());
    }

    #[test]
    fn test_parse_help() {
        let event = repository().parse(".add_role -h").unwrap();
        assert!(event.is_help());
    }

    #[test]
    fn test_parse_propagates_tokenizer_errors() {
        let err = repository()
            .parse(r#".add_role #general 42 "EZ Clap 7"#)
            .unwrap_err();
        assert!(matches!(err, CommandError::UnterminatedQuote { .. }));
    }

    #[test]
    fn test_help_message_lookup() {
        let repository = repository();
        let help = repository.help_message(".add_role --help").unwrap();
        assert!(help.starts_with("Add a role reaction listener\n\nUsage:\n"));
        assert!(repository.help_message(".nope").is_none());
    }
}
