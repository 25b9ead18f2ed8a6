//! `add_role`: registers a role reaction listener on a message.
//!
//! ```text
//! .add_role [options] <channel> <message id> <emoji> <role>
//! ```
//!
//! Message takes a bare identifier or chat mention. Channel and role also
//! accept display names such as `#general` or `@Admins`, kept unresolved as
//! [`EntityRef::Name`].

use std::any::Any;

use serde::Serialize;

use crate::argument::Argument;
use crate::command::Command;
use crate::error::DefinitionResult;
use crate::event::{CommandEvent, EventBuilder};
use crate::parsers::{parse_entity_ref, parse_mention, parse_string};
use crate::snowflake::{EntityRef, Snowflake};

/// Name the command is registered under.
pub const COMMAND: &str = "add_role";

const ABOUT: &str = "Add a role reaction listener";
const USAGE: &str = "add_role [options] <channel> <message id> <emoji> <role>";
const ABOUT_VERIFY: &str = "Run both add and remove verify checks on this role reaction";
const ABOUT_VERIFY_ADD: &str = "Run add verify checks on this role reaction";
const ABOUT_VERIFY_REMOVE: &str = "Run remove verify checks on this role reaction";

/// Request to create a role reaction listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleReactionEvent {
    help: bool,
    valid: bool,
    verify: bool,
    verify_add: bool,
    verify_remove: bool,
    channel: Option<EntityRef>,
    message_id: Option<Snowflake>,
    emoji_name: Option<String>,
    role: Option<EntityRef>,
}

impl RoleReactionEvent {
    /// Starts an empty builder.
    pub fn builder() -> RoleReactionEventBuilder {
        RoleReactionEventBuilder::default()
    }

    /// Run both add and remove verification.
    pub fn is_verify(&self) -> bool {
        self.verify
    }

    /// Run add verification.
    pub fn is_verify_add(&self) -> bool {
        self.verify_add
    }

    /// Run remove verification.
    pub fn is_verify_remove(&self) -> bool {
        self.verify_remove
    }

    /// Channel containing the message.
    pub fn channel(&self) -> Option<&EntityRef> {
        self.channel.as_ref()
    }

    /// Channel identifier, `None` when the channel was given by name.
    pub fn channel_id(&self) -> Option<Snowflake> {
        self.channel.as_ref().and_then(EntityRef::id)
    }

    /// Message carrying the reaction.
    pub fn message_id(&self) -> Option<Snowflake> {
        self.message_id
    }

    /// Reaction emoji, by name or raw unicode.
    pub fn emoji_name(&self) -> Option<&str> {
        self.emoji_name.as_deref()
    }

    /// Role to assign or remove.
    pub fn role(&self) -> Option<&EntityRef> {
        self.role.as_ref()
    }

    pub fn role_id(&self) -> Option<Snowflake> {
        self.role.as_ref().and_then(EntityRef::id)
    }
}

impl CommandEvent for RoleReactionEvent {
    fn event_name(&self) -> &'static str {
        "role_reaction"
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

/// Value builder for [`RoleReactionEvent`].
#[derive(Debug, Clone)]
pub struct RoleReactionEventBuilder {
    event: RoleReactionEvent,
}

impl Default for RoleReactionEventBuilder {
    fn default() -> Self {
        Self {
            event: RoleReactionEvent {
                help: false,
                valid: true,
                verify: false,
                verify_add: false,
                verify_remove: false,
                channel: None,
                message_id: None,
                emoji_name: None,
                role: None,
            },
        }
    }
}

impl RoleReactionEventBuilder {
    pub fn verify(mut self, verify: bool) -> Self {
        self.event.verify = verify;
        self
    }

    pub fn verify_add(mut self, verify_add: bool) -> Self {
        self.event.verify_add = verify_add;
        self
    }

    pub fn verify_remove(mut self, verify_remove: bool) -> Self {
        self.event.verify_remove = verify_remove;
        self
    }

    pub fn channel(mut self, channel: impl Into<EntityRef>) -> Self {
        self.event.channel = Some(channel.into());
        self
    }

    pub fn message_id(mut self, message_id: Snowflake) -> Self {
        self.event.message_id = Some(message_id);
        self
    }

    pub fn emoji_name(mut self, emoji_name: impl Into<String>) -> Self {
        self.event.emoji_name = Some(emoji_name.into());
        self
    }

    pub fn role(mut self, role: impl Into<EntityRef>) -> Self {
        self.event.role = Some(role.into());
        self
    }
}

impl EventBuilder for RoleReactionEventBuilder {
    type Event = RoleReactionEvent;

    fn help(mut self, help: bool) -> Self {
        self.event.help = help;
        self
    }

    fn valid(mut self, valid: bool) -> Self {
        self.event.valid = valid;
        self
    }

    fn build(self) -> RoleReactionEvent {
        self.event
    }
}

/// Builds the `add_role` command.
pub fn add_role() -> DefinitionResult<Command<RoleReactionEventBuilder>> {
    Command::builder(COMMAND)
        .about(ABOUT)
        .usage(USAGE)
        .argument(Argument::flag(
            "verify",
            'V',
            ABOUT_VERIFY,
            RoleReactionEventBuilder::verify,
        ))
        .argument(Argument::flag(
            "verify_add",
            'A',
            ABOUT_VERIFY_ADD,
            RoleReactionEventBuilder::verify_add,
        ))
        .argument(Argument::flag(
            "verify_remove",
            'R',
            ABOUT_VERIFY_REMOVE,
            RoleReactionEventBuilder::verify_remove,
        ))
        .argument(
            Argument::positional(
                "channel",
                "Channel containing the message",
                parse_entity_ref,
                |builder: RoleReactionEventBuilder, channel: EntityRef| builder.channel(channel),
            )
            .required(),
        )
        .argument(
            Argument::positional(
                "message",
                "Message to watch for reactions",
                parse_mention,
                RoleReactionEventBuilder::message_id,
            )
            .required(),
        )
        .argument(
            Argument::positional(
                "emoji",
                "Reaction emoji",
                parse_string,
                |builder: RoleReactionEventBuilder, emoji: String| builder.emoji_name(emoji),
            )
            .required(),
        )
        .argument(
            Argument::positional(
                "role",
                "Role to assign",
                parse_entity_ref,
                |builder: RoleReactionEventBuilder, role: EntityRef| builder.role(role),
            )
            .required(),
        )
        .build()
}
