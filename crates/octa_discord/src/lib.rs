//! Discord platform for the Octa command framework.
//!
//! Plugs serenity into `octa_core`: events arrive through a raw event
//! handler, chat-input interactions are routed by their subcommand path,
//! and command payloads are pushed with serenity's bulk-overwrite calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dm;
mod gateway;
mod intents;
mod platform;

pub use client::DiscordClient;
pub use dm::open_dm;
pub use gateway::DiscordGateway;
pub use intents::{all_intents, default_intents, intents_for};
pub use platform::{Discord, subcommand_path};

/// Serenity, re-exported for handler signatures.
pub use serenity;
