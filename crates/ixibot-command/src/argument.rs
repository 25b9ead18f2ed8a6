//! Argument definitions.
//!
//! An [`Argument`] is a named slot of a [`Command`](crate::Command) that claims
//! tokens and folds the parsed value into the command's builder. There are two
//! shapes:
//!
//! - **Optional** arguments are matched by flag syntax: `--name`,
//!   `--name=value[,value...]`, `-c` or a bundle such as `-abc`
//! - **Positional** arguments are never matched by scanning; they bind to
//!   leftover bare tokens in declaration order, or explicitly via
//!   `name=value[,value...]`
//!
//! The value type lives only inside the argument's consume closure, so one
//! command can hold arguments of many value types without any runtime casts.

use std::fmt;

use crate::error::CommandResult;
use crate::parsers::parse_bool;

const LONG_MARKER: &str = "--";
const SHORT_MARKER: char = '-';
const INLINE_VALUE: char = '=';
const LIST_SEPARATOR: char = ',';

type Consume<B> = Box<dyn Fn(B, &str, &[String]) -> CommandResult<B> + Send + Sync>;

// ============================================================================
// Arity
// ============================================================================

/// How many loose tokens an argument claims after its flag or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No loose tokens; a value may only be given inline (`--flag=no`).
    Flag,
    /// One token, or none when a value was given inline.
    Single,
    /// Every token up to the next option or explicit positional binding.
    Multiple,
}

/// Whether an argument is matched by flag or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Matched by `--name` or by its short character.
    Optional {
        /// Short form, used as `-c` or inside a bundle.
        short: char,
    },
    /// Bound by position or by `name=value`.
    Positional {
        /// When unbound, the built event is marked invalid.
        required: bool,
    },
}

// ============================================================================
// Option token classification
// ============================================================================

/// A token written in option syntax, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionToken<'a> {
    /// `--name` or `--name=value`.
    Long {
        name: &'a str,
        inline: Option<&'a str>,
    },
    /// `-c`, `-abc` or `-c=value`.
    Short {
        chars: &'a str,
        inline: Option<&'a str>,
    },
}

impl<'a> OptionToken<'a> {
    /// Classifies `token`, returning `None` for anything that is a plain value.
    ///
    /// `-` followed by a digit is a plain value so that negative numbers can
    /// be passed as parameters. A lone `-` or `--` is a plain value too.
    pub(crate) fn parse(token: &'a str) -> Option<Self> {
        if let Some(long) = token.strip_prefix(LONG_MARKER) {
            if long.is_empty() {
                return None;
            }
            let (name, inline) = split_inline(long);
            return Some(Self::Long { name, inline });
        }

        let short = token.strip_prefix(SHORT_MARKER)?;
        match short.chars().next() {
            Some(first) if !first.is_ascii_digit() => {
                let (chars, inline) = split_inline(short);
                Some(Self::Short { chars, inline })
            }
            _ => None,
        }
    }
}

fn split_inline(option: &str) -> (&str, Option<&str>) {
    match option.split_once(INLINE_VALUE) {
        Some((key, value)) => (key, Some(value)),
        None => (option, None),
    }
}

// ============================================================================
// Argument
// ============================================================================

/// A named slot of a command, generic over the command's builder `B`.
pub struct Argument<B> {
    name: String,
    about: String,
    kind: ArgumentKind,
    arity: Arity,
    consume: Consume<B>,
}

impl<B: 'static> Argument<B> {
    /// Creates an optional argument taking one value.
    ///
    /// `parser` turns the claimed parameters into a value and `accumulate`
    /// folds that value into the builder.
    pub fn optional<T, P, A>(
        name: impl Into<String>,
        short: char,
        about: impl Into<String>,
        parser: P,
        accumulate: A,
    ) -> Self
    where
        T: 'static,
        P: Fn(&str, &[String]) -> CommandResult<T> + Send + Sync + 'static,
        A: Fn(B, T) -> B + Send + Sync + 'static,
    {
        Self::new(
            name.into(),
            about.into(),
            ArgumentKind::Optional { short },
            Arity::Single,
            parser,
            accumulate,
        )
    }

    /// Creates a boolean flag: present means `true` unless `--name=<bool>`
    /// says otherwise.
    pub fn flag<A>(
        name: impl Into<String>,
        short: char,
        about: impl Into<String>,
        accumulate: A,
    ) -> Self
    where
        A: Fn(B, bool) -> B + Send + Sync + 'static,
    {
        Self::new(
            name.into(),
            about.into(),
            ArgumentKind::Optional { short },
            Arity::Flag,
            parse_bool,
            accumulate,
        )
    }

    /// Creates a positional argument taking one value.
    pub fn positional<T, P, A>(
        name: impl Into<String>,
        about: impl Into<String>,
        parser: P,
        accumulate: A,
    ) -> Self
    where
        T: 'static,
        P: Fn(&str, &[String]) -> CommandResult<T> + Send + Sync + 'static,
        A: Fn(B, T) -> B + Send + Sync + 'static,
    {
        Self::new(
            name.into(),
            about.into(),
            ArgumentKind::Positional { required: false },
            Arity::Single,
            parser,
            accumulate,
        )
    }

    fn new<T, P, A>(
        name: String,
        about: String,
        kind: ArgumentKind,
        arity: Arity,
        parser: P,
        accumulate: A,
    ) -> Self
    where
        T: 'static,
        P: Fn(&str, &[String]) -> CommandResult<T> + Send + Sync + 'static,
        A: Fn(B, T) -> B + Send + Sync + 'static,
    {
        let consume = move |builder: B, name: &str, parameters: &[String]| {
            let value = parser(name, parameters)?;
            Ok(accumulate(builder, value))
        };
        Self {
            name,
            about,
            kind,
            arity,
            consume: Box::new(consume),
        }
    }
}

impl<B> Argument<B> {
    /// Lets the argument claim every following loose token.
    ///
    /// Pair this with a list parser such as [`parsers::list`](crate::parsers::list).
    pub fn multiple(mut self) -> Self {
        self.arity = Arity::Multiple;
        self
    }

    /// Marks a positional argument as required. Has no effect on optional
    /// arguments.
    pub fn required(mut self) -> Self {
        if let ArgumentKind::Positional { required } = &mut self.kind {
            *required = true;
        }
        self
    }

    /// Long name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line help text.
    pub fn about(&self) -> &str {
        &self.about
    }

    /// Optional or positional.
    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    /// Loose token policy.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Short character of an optional argument.
    pub fn short(&self) -> Option<char> {
        match self.kind {
            ArgumentKind::Optional { short } => Some(short),
            ArgumentKind::Positional { .. } => None,
        }
    }

    /// Returns `true` for positional arguments.
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ArgumentKind::Positional { .. })
    }

    /// Returns `true` for required positional arguments.
    pub fn is_required(&self) -> bool {
        matches!(self.kind, ArgumentKind::Positional { required: true })
    }

    /// Returns `true` if `token` selects this argument by flag syntax.
    ///
    /// Long options match on exact name equality, ignoring any `=value`
    /// suffix. Short options match a lone `-c` or any bundle containing the
    /// short character. Positional arguments never match.
    pub fn is_match(&self, token: &str) -> bool {
        let Some(short) = self.short() else {
            return false;
        };
        match OptionToken::parse(token) {
            Some(OptionToken::Long { name, .. }) => name == self.name,
            Some(OptionToken::Short { chars, .. }) => chars.contains(short),
            None => false,
        }
    }

    /// Returns the value part if `token` is `name=value` for this positional.
    pub fn explicit_value<'t>(&self, token: &'t str) -> Option<&'t str> {
        if !self.is_positional() {
            return None;
        }
        match token.split_once(INLINE_VALUE) {
            Some((key, value)) if key == self.name => Some(value),
            _ => None,
        }
    }

    /// Splits an inline value into parameters.
    ///
    /// Only [`Arity::Multiple`] arguments split on commas; everything else
    /// receives the inline text as one parameter.
    pub(crate) fn inline_parameters(&self, value: &str) -> Vec<String> {
        match self.arity {
            Arity::Multiple => value.split(LIST_SEPARATOR).map(str::to_string).collect(),
            Arity::Flag | Arity::Single => vec![value.to_string()],
        }
    }

    /// Parses `parameters` and folds the value into `builder`.
    pub(crate) fn consume(&self, builder: B, parameters: &[String]) -> CommandResult<B> {
        (self.consume)(builder, &self.name, parameters)
    }

    /// Left column of this argument's help line.
    pub(crate) fn help_label(&self) -> String {
        match self.kind {
            ArgumentKind::Optional { short } => {
                format!("{SHORT_MARKER}{short}, {LONG_MARKER}{}", self.name)
            }
            ArgumentKind::Positional { .. } => self.name.clone(),
        }
    }
}

impl<B> fmt::Debug for Argument<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::parsers::{self, value};

    #[derive(Debug, Default, PartialEq)]
    struct Collected {
        flags: Vec<(&'static str, bool)>,
        ids: Vec<i64>,
    }

    fn verify() -> Argument<Collected> {
        Argument::flag("verify", 'V', "Run verify checks", |mut b: Collected, v| {
            b.flags.push(("verify", v));
            b
        })
    }

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_option_token_classification() {
        assert_eq!(
            OptionToken::parse("--verify=true"),
            Some(OptionToken::Long {
                name: "verify",
                inline: Some("true")
            })
        );
        assert_eq!(
            OptionToken::parse("-abc"),
            Some(OptionToken::Short {
                chars: "abc",
                inline: None
            })
        );
        assert_eq!(OptionToken::parse("-5"), None);
        assert_eq!(OptionToken::parse("-"), None);
        assert_eq!(OptionToken::parse("--"), None);
        assert_eq!(OptionToken::parse("#general"), None);
    }

    #[test]
    fn test_long_match_is_exact() {
        let arg = verify();
        assert!(arg.is_match("--verify"));
        assert!(arg.is_match("--verify=true"));
        assert!(!arg.is_match("--verify-all"));
        assert!(!arg.is_match("--verif"));
        assert!(!arg.is_match("verify"));
    }

    #[test]
    fn test_short_match_and_bundles() {
        let arg = Argument::flag("bold", 'b', "Bold", |b: Collected, _| b);
        assert!(arg.is_match("-b"));
        assert!(arg.is_match("-abc"));
        assert!(!arg.is_match("-xyz"));
        assert!(!arg.is_match("-B"));
    }

    #[test]
    fn test_positional_never_matches_by_scanning() {
        let arg = Argument::positional("role", "Role", parsers::parse_i64, |b: Collected, _| b);
        assert!(!arg.is_match("--role"));
        assert!(!arg.is_match("7"));
        assert_eq!(arg.explicit_value("role=7"), Some("7"));
        assert_eq!(arg.explicit_value("roles=7"), None);
        assert_eq!(verify().explicit_value("verify=no"), None);
    }

    #[test]
    fn test_consume_folds_parsed_value() {
        let arg = verify();
        let builder = arg.consume(Collected::default(), &[]).unwrap();
        let builder = arg.consume(builder, &params(&["no"])).unwrap();
        assert_eq!(builder.flags, vec![("verify", true), ("verify", false)]);
    }

    #[test]
    fn test_consume_reports_argument_name() {
        let arg = verify();
        let err = arg
            .consume(Collected::default(), &params(&["maybe"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidParameterValue { .. }));
        assert_eq!(err.argument_name(), Some("verify"));
    }

    #[test]
    fn test_inline_parameters_split_only_for_lists() {
        let ids = Argument::optional(
            "ids",
            'i',
            "Ids",
            parsers::list(value::number::<i64>),
            |mut b: Collected, ids| {
                b.ids.extend(ids);
                b
            },
        )
        .multiple();
        assert_eq!(ids.inline_parameters("1,2"), params(&["1", "2"]));
        assert_eq!(verify().inline_parameters("a,b"), params(&["a,b"]));

        let builder = ids
            .consume(Collected::default(), &ids.inline_parameters("4,5"))
            .unwrap();
        assert_eq!(builder.ids, vec![4, 5]);
    }

    #[test]
    fn test_required_only_applies_to_positionals() {
        let role =
            Argument::positional("role", "Role", parsers::parse_i64, |b: Collected, _| b).required();
        assert!(role.is_required());
        assert!(!verify().required().is_required());
    }

    #[test]
    fn test_help_label() {
        assert_eq!(verify().help_label(), "-V, --verify");
        let role = Argument::positional("role", "Role", parsers::parse_i64, |b: Collected, _| b);
        assert_eq!(role.help_label(), "role");
    }
}
