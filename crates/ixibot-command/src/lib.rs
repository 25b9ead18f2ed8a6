//! # ixibot Command
//!
//! Turns one line of chat text into a strongly typed, immutable command event.
//!
//! ## Pipeline
//!
//! ```text
//! ".add_role -V #general 42 \"party parrot\" 7"
//!        │
//!        ▼
//! ┌───────────────────┐  prefix check, name split
//! │ CommandRepository │──────────────────────────────┐
//! └───────────────────┘                              ▼
//!                                          ┌───────────────────┐
//!                                          │     tokenize      │
//!                                          └───────────────────┘
//!                                                    │
//!                                                    ▼
//! ┌───────────────────┐   map tokens    ┌───────────────────────┐
//! │  Command<B>       │────────────────▶│ Argument<B> + parsers │
//! └───────────────────┘                 └───────────────────────┘
//!        │ fold into builder B, then build()
//!        ▼
//!   BoxedEvent (downcast to the concrete event)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ixibot_command::builtin::{RoleReactionEvent, add_role};
//! use ixibot_command::{CommandRepository, Snowflake};
//!
//! let mut repository = CommandRepository::new(".");
//! repository.register(add_role().unwrap());
//!
//! let event = repository
//!     .parse(r#".add_role -V <#1> 2 ":smile:" <@&3>"#)
//!     .unwrap();
//! let event = event.downcast_ref::<RoleReactionEvent>().unwrap();
//! assert!(event.is_verify());
//! assert_eq!(event.role_id(), Some(Snowflake::new(3)));
//! ```
//!
//! ## Option syntax
//!
//! - `--name` and `--name=value[,value...]`
//! - `-c` and bundles such as `-abc`
//! - bare positional tokens, or `positional=value[,value...]`
//! - `--help` / `-h` anywhere short-circuits to a help event, unless given
//!   an inline false value such as `--help=no`

pub mod argument;
pub mod builtin;
pub mod command;
pub mod error;
pub mod event;
pub mod parsers;
pub mod repository;
pub mod snowflake;
pub mod split;
pub mod validation;

pub use argument::{Argument, ArgumentKind, Arity};
pub use command::{COLUMN_WIDTH, Command, CommandBuilder, ErasedCommand};
pub use error::{CommandError, CommandResult, DefinitionError, DefinitionResult};
pub use event::{BoxedEvent, CommandEvent, EventBuilder};
pub use repository::{CommandRepository, DEFAULT_PREFIX};
pub use snowflake::{EntityRef, Snowflake};
pub use split::{join_tokens, quote_token, tokenize};
