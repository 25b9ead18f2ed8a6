//! Opaque 64-bit platform identifiers and references built on them.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Milliseconds between the Unix epoch and the first second of 2015, the
/// epoch Discord snowflakes count from.
pub const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// A platform entity identifier (channel, message, role, user, ...).
///
/// Snowflakes are unsigned 64-bit integers written in base 10. Apart from the
/// embedded creation timestamp they carry no meaning and are compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Wraps a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Creation time encoded in the upper 42 bits, in Unix milliseconds.
    pub const fn timestamp_millis(self) -> u64 {
        (self.0 >> 22) + DISCORD_EPOCH_MILLIS
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A channel, role or user named by identifier or by display name.
///
/// Serializes as the bare number for [`Id`](Self::Id) and as a string for
/// [`Name`](Self::Name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(Snowflake),
    /// Display name without its `#` or `@` sigil. Resolving it is up to the
    /// consumer of the event.
    Name(String),
}

impl EntityRef {
    pub fn id(&self) -> Option<Snowflake> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Name(name) => Some(name.as_str()),
        }
    }
}

impl From<Snowflake> for EntityRef {
    fn from(id: Snowflake) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for EntityRef {
    fn from(id: u64) -> Self {
        Self::Id(Snowflake(id))
    }
}

impl From<&str> for EntityRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => fmt::Display::fmt(id, f),
            Self::Name(name) => f.write_str(name),
        }
    }
}
