//! Declarative slash commands and event listeners for chat-bot clients.
//!
//! Callers describe commands and listeners as plain data. This crate turns
//! them into the wire payloads the registration endpoint expects and into
//! the dispatch tables that route incoming interactions to handlers.
//!
//! # Architecture
//!
//! - **command / option**: the command schema
//! - **translator**: schema → wire payload + dispatch table, with validation
//! - **payload**: serde structs matching the registration JSON
//! - **route**: dispatch tables keyed by subcommand path
//! - **events**: listeners and the fluent `EventBuilder`
//! - **dispatch**: the frozen subscription table and failure policy
//! - **runner**: the ordered work queue (`BotBuilder` → `BotPlan`)
//! - **platform**: traits abstracting the wrapped client
//!
//! Nothing here talks to the network. A platform crate (such as
//! `octa_discord`) implements [`Platform`], [`CommandRegistrar`], and
//! [`Gateway`] for a concrete client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod dispatch;
mod events;
mod option;
mod payload;
mod platform;
mod route;
mod runner;
mod translator;

pub use command::{Command, Subcommand, SubcommandGroup};
pub use dispatch::Dispatcher;
pub use events::{EventBuilder, EventKind, EventListener};
pub use option::{
    ChannelConstraints, ChannelKind, Choice, CommandOption, NumericConstraints, OptionKind,
    OptionKindTag, StringConstraints,
};
pub use payload::{CHAT_INPUT, ChoicePayload, CommandPayload, OptionPayload, OptionType};
pub use platform::{
    CommandHandler, CommandRegistrar, EventHandler, Gateway, Invocation, Platform, RawJob,
    command_handler, event_handler, raw_job,
};
pub use route::{CommandPath, DispatchTable};
pub use runner::{BotBuilder, BotPlan, CommandSet, EventsFn, WorkItem, WorkKind};
pub use translator::{
    MAX_DESCRIPTION_LEN, MAX_ENTRIES, MAX_NAME_LEN, MAX_STRING_LEN, TranslatedCommand,
    check_name, translate, translate_option, translate_options,
};
