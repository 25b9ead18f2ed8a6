//! Value parsers turning argument parameters into typed values.
//!
//! Two layers are provided:
//!
//! - [`value`] holds element parsers of the shape `(name, &str) -> T` which
//!   convert one raw token.
//! - The functions at the top level have the shape `(name, &[String]) -> T`
//!   expected by [`Argument`](crate::Argument) and enforce the parameter count
//!   before delegating to an element parser.
//!
//! `name` is only used to build error messages.
//!
//! ```rust
//! use ixibot_command::parsers::{self, value};
//!
//! let ids = parsers::list(value::snowflake)("ids", &["1".into(), "2".into()]).unwrap();
//! assert_eq!(ids.len(), 2);
//! ```

use crate::error::CommandResult;
use crate::snowflake::{EntityRef, Snowflake};
use crate::validation::{
    require_at_least_one, require_exactly_one, require_single_character, require_zero_or_one,
};

/// Literals accepted as `false`, compared case-insensitively.
pub const FALSE_VALUES: [&str; 4] = ["f", "false", "n", "no"];
/// Literals accepted as `true`, compared case-insensitively.
pub const TRUE_VALUES: [&str; 4] = ["t", "true", "y", "yes"];

/// Element parsers for a single raw token.
pub mod value {
    use std::any::type_name;
    use std::str::FromStr;

    use super::{FALSE_VALUES, TRUE_VALUES};
    use crate::error::{CommandError, CommandResult};
    use crate::snowflake::{EntityRef, Snowflake};

    /// Parses a boolean literal.
    pub fn boolean(name: &str, value: &str) -> CommandResult<bool> {
        let lowered = value.to_lowercase();
        if TRUE_VALUES.contains(&lowered.as_str()) {
            Ok(true)
        } else if FALSE_VALUES.contains(&lowered.as_str()) {
            Ok(false)
        } else {
            Err(CommandError::parameter_value(
                name,
                format!("a boolean, one of false {FALSE_VALUES:?} or true {TRUE_VALUES:?}"),
                value,
            ))
        }
    }

    /// Parses any base-10 number via [`FromStr`].
    pub fn number<T: FromStr>(name: &str, value: &str) -> CommandResult<T> {
        value.parse().map_err(|_| {
            CommandError::parameter_value(name, format!("a number ({})", type_name::<T>()), value)
        })
    }

    /// Parses a bare base-10 identifier.
    pub fn snowflake(name: &str, value: &str) -> CommandResult<Snowflake> {
        value
            .parse()
            .map_err(|_| CommandError::parameter_value(name, "a numeric identifier", value))
    }

    /// Parses an identifier that may be written as a chat mention.
    ///
    /// Accepts `123`, `<#123>` (channel), `<@123>` / `<@!123>` (user) and
    /// `<@&123>` (role).
    pub fn mention(name: &str, value: &str) -> CommandResult<Snowflake> {
        strip_mention(value).parse().map_err(|_| {
            CommandError::parameter_value(name, "a numeric identifier or mention", value)
        })
    }

    /// Parses an identifier, a mention or a display name.
    ///
    /// Anything [`mention`] accepts becomes [`EntityRef::Id`]. Otherwise one
    /// leading `#` or `@` is dropped and the rest is kept as
    /// [`EntityRef::Name`], so `#general` and `@Admins` name `general` and
    /// `Admins`. An empty name or a malformed `<...>` mention is an error.
    pub fn entity_ref(name: &str, value: &str) -> CommandResult<EntityRef> {
        if let Ok(id) = mention(name, value) {
            return Ok(EntityRef::Id(id));
        }
        let display = value
            .strip_prefix('#')
            .or_else(|| value.strip_prefix('@'))
            .unwrap_or(value);
        if display.is_empty() || value.starts_with('<') {
            return Err(CommandError::parameter_value(
                name,
                "an identifier, mention or name",
                value,
            ));
        }
        Ok(EntityRef::Name(display.to_string()))
    }

    /// Returns the token unchanged.
    pub fn string(_name: &str, value: &str) -> CommandResult<String> {
        Ok(value.to_string())
    }

    /// Parses a single character.
    pub fn character(name: &str, value: &str) -> CommandResult<char> {
        super::require_single_character(name, value)
    }

    fn strip_mention(value: &str) -> &str {
        let Some(inner) = value.strip_prefix('<').and_then(|v| v.strip_suffix('>')) else {
            return value;
        };
        if let Some(channel) = inner.strip_prefix('#') {
            return channel;
        }
        match inner.strip_prefix('@') {
            Some(target) => target
                .strip_prefix('!')
                .or_else(|| target.strip_prefix('&'))
                .unwrap_or(target),
            None => value,
        }
    }
}

/// Applies `element` to exactly one parameter.
pub fn single_value<T, F>(name: &str, parameters: &[String], element: F) -> CommandResult<T>
where
    F: Fn(&str, &str) -> CommandResult<T>,
{
    let value = require_exactly_one(name, parameters)?;
    element(name, value)
}

/// Applies `element` to each of one or more parameters, preserving order.
pub fn multi_value<T, F>(name: &str, parameters: &[String], element: F) -> CommandResult<Vec<T>>
where
    F: Fn(&str, &str) -> CommandResult<T>,
{
    require_at_least_one(name, parameters)?;
    parameters
        .iter()
        .map(|parameter| element(name, parameter))
        .collect()
}

/// Lifts an element parser into a list parser usable by an argument.
pub fn list<T, F>(element: F) -> impl Fn(&str, &[String]) -> CommandResult<Vec<T>> + Send + Sync
where
    F: Fn(&str, &str) -> CommandResult<T> + Send + Sync,
{
    move |name, parameters| multi_value(name, parameters, &element)
}

/// Flag parser: no parameters means `true`, otherwise one boolean literal.
pub fn parse_bool(name: &str, parameters: &[String]) -> CommandResult<bool> {
    match require_zero_or_one(name, parameters)? {
        None => Ok(true),
        Some(value) => value::boolean(name, value),
    }
}

/// Parses one base-10 number of any [`FromStr`](std::str::FromStr) type.
pub fn parse_number<T: std::str::FromStr>(name: &str, parameters: &[String]) -> CommandResult<T> {
    single_value(name, parameters, value::number::<T>)
}

/// Parses one signed 64-bit integer.
pub fn parse_i64(name: &str, parameters: &[String]) -> CommandResult<i64> {
    parse_number(name, parameters)
}

/// Parses one 64-bit float.
pub fn parse_f64(name: &str, parameters: &[String]) -> CommandResult<f64> {
    single_value(name, parameters, value::number::<f64>)
}

/// Parses one bare numeric identifier.
pub fn parse_snowflake(name: &str, parameters: &[String]) -> CommandResult<Snowflake> {
    single_value(name, parameters, value::snowflake)
}

/// Parses one identifier, accepting chat mention syntax.
pub fn parse_mention(name: &str, parameters: &[String]) -> CommandResult<Snowflake> {
    single_value(name, parameters, value::mention)
}

/// Parses one identifier, mention or display name.
pub fn parse_entity_ref(name: &str, parameters: &[String]) -> CommandResult<EntityRef> {
    single_value(name, parameters, value::entity_ref)
}

/// Returns the single parameter verbatim.
pub fn parse_string(name: &str, parameters: &[String]) -> CommandResult<String> {
    single_value(name, parameters, value::string)
}

/// Parses one single-character parameter.
pub fn parse_char(name: &str, parameters: &[String]) -> CommandResult<char> {
    single_value(name, parameters, value::character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("verify", &[]).unwrap());
        assert!(parse_bool("verify", &params(&["yes"])).unwrap());
        assert!(parse_bool("verify", &params(&["T"])).unwrap());
        assert!(!parse_bool("verify", &params(&["NO"])).unwrap());
        assert!(!parse_bool("verify", &params(&["false"])).unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_unknown_literal() {
        let err = parse_bool("verify", &params(&["maybe"])).unwrap_err();
        assert!(matches!(err, CommandError::InvalidParameterValue { .. }));
        assert_eq!(err.argument_name(), Some("verify"));
        assert!(err.to_string().contains("<maybe>"));
    }

    #[test]
    fn test_parse_bool_rejects_two_values() {
        let err = parse_bool("verify", &params(&["yes", "no"])).unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidParameterCount { actual: 2, .. }
        ));
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("count", &params(&["-42"])).unwrap(), -42);
        assert!(matches!(
            parse_i64("count", &params(&["4x"])),
            Err(CommandError::InvalidParameterValue { .. })
        ));
        assert!(matches!(
            parse_i64("count", &[]),
            Err(CommandError::InvalidParameterCount { .. })
        ));
        assert!(parse_i64("count", &params(&["9223372036854775808"])).is_err());
    }

    #[test]
    fn test_parse_number_respects_target_range() {
        assert_eq!(parse_number::<u8>("level", &params(&["255"])).unwrap(), 255);
        assert!(parse_number::<u8>("level", &params(&["256"])).is_err());
        assert!(parse_number::<u32>("level", &params(&["-1"])).is_err());
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("ratio", &params(&["0.5"])).unwrap(), 0.5);
        assert!(parse_f64("ratio", &params(&["half"])).is_err());
    }

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(
            parse_snowflake("role", &params(&["123456789012345678"])).unwrap(),
            Snowflake::new(123_456_789_012_345_678)
        );
        assert!(parse_snowflake("role", &params(&["@Admins"])).is_err());
        assert!(parse_snowflake("role", &params(&["<@&7>"])).is_err());
    }

    #[test]
    fn test_parse_mention() {
        for (input, expected) in [
            ("7", 7),
            ("<#7>", 7),
            ("<@7>", 7),
            ("<@!7>", 7),
            ("<@&7>", 7),
        ] {
            assert_eq!(
                parse_mention("role", &params(&[input])).unwrap(),
                Snowflake::new(expected),
                "input: {input}"
            );
        }
        assert!(parse_mention("channel", &params(&["#general"])).is_err());
        assert!(parse_mention("channel", &params(&["<#general>"])).is_err());
        assert!(parse_mention("channel", &params(&["<7>"])).is_err());
    }

    #[test]
    fn test_parse_entity_ref() {
        for (input, expected) in [
            ("7", EntityRef::Id(Snowflake::new(7))),
            ("<#7>", EntityRef::Id(Snowflake::new(7))),
            ("<@&7>", EntityRef::Id(Snowflake::new(7))),
            ("#general", EntityRef::from("general")),
            ("@Admins", EntityRef::from("Admins")),
            ("Members", EntityRef::from("Members")),
            ("##news", EntityRef::from("#news")),
        ] {
            assert_eq!(
                parse_entity_ref("channel", &params(&[input])).unwrap(),
                expected,
                "input: {input}"
            );
        }

        for input in ["#", "@", "", "<#general>", "<7>"] {
            let err = parse_entity_ref("channel", &params(&[input])).unwrap_err();
            assert!(
                matches!(err, CommandError::InvalidParameterValue { .. }),
                "input: {input:?}"
            );
        }
        assert!(parse_entity_ref("channel", &params(&["a", "b"])).is_err());
    }

    #[test]
    fn test_parse_string_is_verbatim() {
        assert_eq!(
            parse_string("emoji", &params(&["party parrot"])).unwrap(),
            "party parrot"
        );
        assert!(parse_string("emoji", &params(&["a", "b"])).is_err());
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char("sep", &params(&[","])).unwrap(), ',');
        assert!(matches!(
            parse_char("sep", &params(&["ab"])),
            Err(CommandError::InvalidParameterValue { .. })
        ));
    }

    #[test]
    fn test_multi_value_keeps_order_and_duplicates() {
        let parser = list(value::number::<i64>);
        assert_eq!(
            parser("ids", &params(&["3", "1", "3"])).unwrap(),
            vec![3, 1, 3]
        );
    }

    #[test]
    fn test_multi_value_requires_a_parameter() {
        let parser = list(value::string);
        assert!(matches!(
            parser("names", &[]),
            Err(CommandError::InvalidParameterCount { actual: 0, .. })
        ));
    }

    #[test]
    fn test_multi_value_fails_on_any_bad_element() {
        let parser = list(value::boolean);
        let err = parser("flags", &params(&["yes", "perhaps"])).unwrap_err();
        assert!(err.to_string().contains("<perhaps>"));
    }
}
