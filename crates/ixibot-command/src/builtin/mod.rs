//! Commands shipped with the bot.

pub mod add_role;

pub use add_role::{RoleReactionEvent, RoleReactionEventBuilder, add_role};
