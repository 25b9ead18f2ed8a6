//! Command definitions, token mapping and help rendering.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::argument::{Argument, Arity, OptionToken};
use crate::error::{CommandError, CommandResult, DefinitionError, DefinitionResult};
use crate::event::{BoxedEvent, EventBuilder};
use crate::parsers::value;

/// Width of the left column in help output.
pub const COLUMN_WIDTH: usize = 24;

/// Long name of the implicit help option.
pub const HELP_NAME: &str = "help";
/// Short character of the implicit help option.
pub const HELP_SHORT: char = 'h';
const HELP_ABOUT: &str = "Show this help message";

// ============================================================================
// Command
// ============================================================================

/// A named parser turning a token list into one event type.
///
/// The implicit help option is always the first argument. A command is
/// immutable once built and may be shared freely between threads.
pub struct Command<B: EventBuilder> {
    name: String,
    about: String,
    usage: String,
    arguments: Vec<Argument<B>>,
}

/// One argument together with the parameters it claimed.
struct Binding<'c, B> {
    position: usize,
    argument: &'c Argument<B>,
    parameters: Vec<String>,
}

impl<B: EventBuilder> Command<B> {
    /// Starts a new command definition.
    pub fn builder(name: impl Into<String>) -> CommandBuilder<B> {
        CommandBuilder::new(name)
    }

    /// Command name, as typed after the prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    pub fn about(&self) -> &str {
        &self.about
    }

    /// Usage line shown in help.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// All arguments, help first.
    pub fn arguments(&self) -> &[Argument<B>] {
        &self.arguments
    }

    /// Exact name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }

    /// Parses tokens into an event.
    ///
    /// If any token selects the help option the result is a default event
    /// with `is_help() == true` and no other argument is evaluated. An inline
    /// value on the help option is honoured: `--help=no` does not request
    /// help and is folded like any other flag, so an invalid literal such as
    /// `--help=maybe` fails with the boolean parser's error.
    /// Otherwise tokens are mapped onto arguments and the values are folded
    /// into a fresh builder in token order. Required positionals left unbound
    /// produce an event with `is_valid() == false`.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnrecognizedArgument`] for tokens no argument claims,
    /// and whatever the argument parsers return.
    pub fn parse(&self, tokens: &[String]) -> CommandResult<B::Event> {
        if tokens.iter().any(|token| self.requests_help(token)) {
            debug!(command = %self.name, "Help requested");
            return Ok(B::default().help(true).build());
        }

        match self.evaluate(tokens) {
            Ok(builder) => {
                debug!(command = %self.name, "Parsed command");
                Ok(builder.build())
            }
            Err(err) => {
                debug!(command = %self.name, error = %err, "Failed to parse command");
                Err(err)
            }
        }
    }

    /// Renders the help text.
    ///
    /// ```text
    /// <about>
    ///
    /// Usage:
    /// <usage>
    ///
    /// Options:
    /// -h, --help              Show this help message.
    /// ```
    ///
    /// An `Arguments:` section listing positionals follows when the command
    /// declares any.
    pub fn help_message(&self) -> String {
        let mut message = format!("{}\n\nUsage:\n{}\n\nOptions:\n", self.about, self.usage);
        for argument in self.arguments.iter().filter(|a| !a.is_positional()) {
            message.push_str(&help_line(argument));
        }

        let mut positionals = self.positionals().peekable();
        if positionals.peek().is_some() {
            message.push_str("\nArguments:\n");
            for argument in positionals {
                message.push_str(&help_line(argument));
            }
        }
        message
    }

    fn help_argument(&self) -> &Argument<B> {
        &self.arguments[0]
    }

    /// Help option without an inline value, or with one that reads as true.
    fn requests_help(&self, token: &str) -> bool {
        if !self.help_argument().is_match(token) {
            return false;
        }
        let inline = match OptionToken::parse(token) {
            Some(OptionToken::Long { inline, .. }) => inline,
            Some(OptionToken::Short { chars, inline }) if chars.ends_with(HELP_SHORT) => inline,
            _ => None,
        };
        inline.is_none_or(|value| value::boolean(HELP_NAME, value).unwrap_or(false))
    }

    fn positionals(&self) -> impl Iterator<Item = &Argument<B>> {
        self.arguments.iter().filter(|a| a.is_positional())
    }

    fn find_long(&self, name: &str) -> Option<&Argument<B>> {
        self.arguments
            .iter()
            .find(|a| !a.is_positional() && a.name() == name)
    }

    fn find_short(&self, short: char) -> Option<&Argument<B>> {
        self.arguments.iter().find(|a| a.short() == Some(short))
    }

    fn find_explicit<'t>(&self, token: &'t str) -> Option<(&Argument<B>, &'t str)> {
        self.positionals()
            .find_map(|a| a.explicit_value(token).map(|value| (a, value)))
    }

    /// Tokens that end a run of loose parameters.
    fn is_boundary(&self, token: &str) -> bool {
        OptionToken::parse(token).is_some() || self.find_explicit(token).is_some()
    }

    fn loose_count(&self, arity: Arity, has_inline: bool, rest: &[String]) -> usize {
        let run = rest.iter().take_while(|t| !self.is_boundary(t)).count();
        match arity {
            Arity::Flag => 0,
            Arity::Single if has_inline => 0,
            Arity::Single => run.min(1),
            Arity::Multiple => run,
        }
    }

    /// Binds an optional argument at `position` and returns how many loose
    /// tokens after it were claimed.
    fn bind_option<'c>(
        &'c self,
        argument: &'c Argument<B>,
        inline: Option<&str>,
        position: usize,
        tokens: &[String],
        bindings: &mut Vec<Binding<'c, B>>,
    ) -> usize {
        let rest = &tokens[position + 1..];
        let taken = self.loose_count(argument.arity(), inline.is_some(), rest);
        let mut parameters = inline
            .map(|value| argument.inline_parameters(value))
            .unwrap_or_default();
        parameters.extend_from_slice(&rest[..taken]);
        bindings.push(Binding {
            position,
            argument,
            parameters,
        });
        taken
    }

    fn evaluate(&self, tokens: &[String]) -> CommandResult<B> {
        let mut bindings = Vec::new();
        let mut explicit = HashSet::new();
        let mut loose = Vec::new();

        let mut position = 0;
        while position < tokens.len() {
            let token = &tokens[position];
            match OptionToken::parse(token) {
                Some(OptionToken::Long { name, inline }) => {
                    let argument = self
                        .find_long(name)
                        .ok_or_else(|| CommandError::unrecognized(token.as_str()))?;
                    position += self.bind_option(argument, inline, position, tokens, &mut bindings);
                }
                Some(OptionToken::Short { chars, inline }) => {
                    if chars.is_empty() {
                        return Err(CommandError::unrecognized(token.as_str()));
                    }
                    let count = chars.chars().count();
                    for (index, short) in chars.chars().enumerate() {
                        let argument = self
                            .find_short(short)
                            .ok_or_else(|| CommandError::unrecognized(token.as_str()))?;
                        if index + 1 < count {
                            bindings.push(Binding {
                                position,
                                argument,
                                parameters: Vec::new(),
                            });
                        } else {
                            position +=
                                self.bind_option(argument, inline, position, tokens, &mut bindings);
                        }
                    }
                }
                None => match self.find_explicit(token) {
                    Some((argument, value)) => {
                        explicit.insert(argument.name());
                        bindings.push(Binding {
                            position,
                            argument,
                            parameters: argument.inline_parameters(value),
                        });
                    }
                    None => loose.push(position),
                },
            }
            position += 1;
        }

        let mut loose = loose.into_iter();
        let mut missing = Vec::new();
        for argument in self.positionals() {
            if explicit.contains(argument.name()) {
                continue;
            }
            let claimed: Vec<usize> = match argument.arity() {
                Arity::Multiple => loose.by_ref().collect(),
                Arity::Flag | Arity::Single => loose.next().into_iter().collect(),
            };
            match claimed.first() {
                Some(&first) => bindings.push(Binding {
                    position: first,
                    argument,
                    parameters: claimed.iter().map(|&i| tokens[i].clone()).collect(),
                }),
                None if argument.is_required() => missing.push(argument.name()),
                None => {}
            }
        }
        if let Some(leftover) = loose.next() {
            return Err(CommandError::unrecognized(tokens[leftover].as_str()));
        }

        bindings.sort_by_key(|binding| binding.position);
        trace!(
            command = %self.name,
            bindings = ?bindings
                .iter()
                .map(|b| (b.argument.name(), &b.parameters))
                .collect::<Vec<_>>(),
            "Mapped tokens to arguments"
        );

        let mut builder = B::default();
        for binding in &bindings {
            builder = binding.argument.consume(builder, &binding.parameters)?;
        }
        if !missing.is_empty() {
            debug!(command = %self.name, ?missing, "Required arguments missing");
            builder = builder.valid(false);
        }
        Ok(builder)
    }
}

impl<B: EventBuilder> std::fmt::Debug for Command<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Spaces placed after a help label of `width` characters.
///
/// Pads to [`COLUMN_WIDTH`], always emitting at least one space.
pub fn padding(width: usize) -> String {
    " ".repeat(COLUMN_WIDTH.saturating_sub(width).max(1))
}

fn help_line<B>(argument: &Argument<B>) -> String {
    let label = argument.help_label();
    let pad = padding(label.chars().count());
    format!("{label}{pad}{}.\n", argument.about())
}

// ============================================================================
// Type erasure
// ============================================================================

/// Object-safe view of a [`Command`] used by the repository.
///
/// Implemented for every `Command<B>`, so commands producing different
/// events can live in one collection.
pub trait ErasedCommand: Send + Sync {
    /// Command name.
    fn name(&self) -> &str;

    /// Exact name comparison.
    fn matches(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Rendered help text.
    fn help_message(&self) -> String;

    /// Parses tokens into a boxed event.
    fn parse_boxed(&self, tokens: &[String]) -> CommandResult<BoxedEvent>;
}

impl<B: EventBuilder> ErasedCommand for Command<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, name: &str) -> bool {
        Command::matches(self, name)
    }

    fn help_message(&self) -> String {
        Command::help_message(self)
    }

    fn parse_boxed(&self, tokens: &[String]) -> CommandResult<BoxedEvent> {
        let event = self.parse(tokens)?;
        Ok(Box::new(event))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects a command definition and validates it on [`build`](Self::build).
pub struct CommandBuilder<B: EventBuilder> {
    name: String,
    about: String,
    usage: String,
    arguments: Vec<Argument<B>>,
}

impl<B: EventBuilder> CommandBuilder<B> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: String::new(),
            usage: String::new(),
            arguments: Vec::new(),
        }
    }

    /// Sets the one-line description.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    /// Sets the usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Appends an argument. Positionals bind in the order they are added.
    pub fn argument(mut self, argument: Argument<B>) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Validates the definition and prepends the help option.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] for empty or malformed names, duplicate
    /// long names or short characters, unusable short characters, and any
    /// attempt to reuse `--help` or `-h`.
    pub fn build(self) -> DefinitionResult<Command<B>> {
        validate_name("command", &self.name)?;
        self.validate_arguments()?;

        let help = Argument::flag(HELP_NAME, HELP_SHORT, HELP_ABOUT, B::help);
        let mut arguments = Vec::with_capacity(self.arguments.len() + 1);
        arguments.push(help);
        arguments.extend(self.arguments);

        debug!(command = %self.name, arguments = arguments.len(), "Built command");
        Ok(Command {
            name: self.name,
            about: self.about,
            usage: self.usage,
            arguments,
        })
    }

    fn validate_arguments(&self) -> DefinitionResult<()> {
        let mut names = HashSet::new();
        let mut shorts = HashSet::new();

        for argument in &self.arguments {
            validate_name("argument", argument.name())?;
            if argument.name() == HELP_NAME {
                return Err(self.reserved(format!("--{HELP_NAME}")));
            }
            if !names.insert(argument.name()) {
                return Err(DefinitionError::DuplicateName {
                    command: self.name.clone(),
                    name: argument.name().to_string(),
                });
            }

            let Some(short) = argument.short() else {
                continue;
            };
            if short == HELP_SHORT {
                return Err(self.reserved(format!("-{HELP_SHORT}")));
            }
            if !is_valid_short(short) {
                return Err(DefinitionError::InvalidShort {
                    name: argument.name().to_string(),
                    short,
                });
            }
            if !shorts.insert(short) {
                return Err(DefinitionError::DuplicateShort {
                    command: self.name.clone(),
                    short,
                });
            }
        }
        Ok(())
    }

    fn reserved(&self, reserved: String) -> DefinitionError {
        DefinitionError::ReservedHelp {
            command: self.name.clone(),
            reserved,
        }
    }
}

fn validate_name(what: &'static str, name: &str) -> DefinitionResult<()> {
    if name.is_empty() {
        return Err(DefinitionError::EmptyName { what });
    }
    if name.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(DefinitionError::InvalidName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn is_valid_short(short: char) -> bool {
    !(short.is_whitespace()
        || short.is_control()
        || short.is_ascii_digit()
        || short == '-'
        || short == '=')
}
