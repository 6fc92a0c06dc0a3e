//! Octa: declarative slash commands and event listeners for Discord bots.
//!
//! Describe commands and listeners as data, hand them to [`Octa`], and call
//! [`Octa::start`]. Commands are translated to registration payloads when
//! added; listeners are attached in the order they were queued; the command
//! set is pushed to Discord once the first ready event arrives.
//!
//! # Crates
//!
//! - `octa_error`: error types
//! - `octa_core`: schema, translation, dispatch, and the work queue
//! - `octa_discord`: the serenity-backed platform
//! - `octa`: configuration, logging, and this entry point

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod banner;
mod bot;
mod config;
mod logging;

pub use banner::{banner_text, show_banner};
pub use bot::Octa;
pub use config::{OctaConfig, TOKEN_FALLBACK_VAR};
pub use logging::{LoggingConfig, init_logging};

pub use octa_core::{
    BotBuilder, BotPlan, ChannelConstraints, ChannelKind, Choice, Command, CommandOption,
    CommandPath, CommandPayload, EventBuilder, EventKind, EventListener, NumericConstraints,
    StringConstraints, Subcommand, SubcommandGroup, WorkKind, translate,
};
pub use octa_discord::{
    Discord, DiscordClient, DiscordGateway, all_intents, default_intents, intents_for, open_dm,
    serenity,
};
pub use octa_error::{
    ConfigError, DispatchError, DispatchErrorKind, GatewayError, GatewayErrorKind, HandlerError,
    HandlerResult, JobError, OctaError, OctaErrorKind, OctaResult, SchemaError, SchemaErrorKind,
};
