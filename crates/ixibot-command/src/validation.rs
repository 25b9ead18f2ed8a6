//! Parameter count and shape checks shared by the value parsers.

use crate::error::{CommandError, CommandResult};

/// Fails unless at least one parameter was supplied.
pub fn require_at_least_one(name: &str, parameters: &[String]) -> CommandResult<()> {
    if parameters.is_empty() {
        return Err(CommandError::parameter_count(name, "at least one", parameters));
    }
    Ok(())
}

/// Fails unless exactly one parameter was supplied, returning it.
pub fn require_exactly_one<'a>(name: &str, parameters: &'a [String]) -> CommandResult<&'a str> {
    match parameters {
        [value] => Ok(value.as_str()),
        _ => Err(CommandError::parameter_count(name, "exactly one", parameters)),
    }
}

/// Fails when more than one parameter was supplied, returning the optional value.
pub fn require_zero_or_one<'a>(
    name: &str,
    parameters: &'a [String],
) -> CommandResult<Option<&'a str>> {
    match parameters {
        [] => Ok(None),
        [value] => Ok(Some(value.as_str())),
        _ => Err(CommandError::parameter_count(name, "zero or one", parameters)),
    }
}

/// Fails unless `value` is exactly one character long, returning it.
pub fn require_single_character(name: &str, value: &str) -> CommandResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CommandError::parameter_value(
            name,
            "a single character",
            value,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_require_at_least_one() {
        assert!(require_at_least_one("ids", &params(&["1"])).is_ok());
        assert!(matches!(
            require_at_least_one("ids", &[]),
            Err(CommandError::InvalidParameterCount { actual: 0, .. })
        ));
    }

    #[test]
    fn test_require_exactly_one() {
        assert_eq!(require_exactly_one("role", &params(&["7"])).unwrap(), "7");
        assert!(require_exactly_one("role", &[]).is_err());
        assert!(require_exactly_one("role", &params(&["7", "8"])).is_err());
    }

    #[test]
    fn test_require_zero_or_one() {
        assert_eq!(require_zero_or_one("verify", &[]).unwrap(), None);
        assert_eq!(
            require_zero_or_one("verify", &params(&["no"])).unwrap(),
            Some("no")
        );
        assert!(require_zero_or_one("verify", &params(&["yes", "no"])).is_err());
    }

    #[test]
    fn test_require_single_character() {
        assert_eq!(require_single_character("sep", "é").unwrap(), 'é');
        assert!(require_single_character("sep", "").is_err());
        assert!(require_single_character("sep", "ab").is_err());
    }
}
