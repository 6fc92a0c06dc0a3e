//! Serenity types plugged into the framework's platform seam.

use crate::DiscordClient;
use octa_core::{EventKind, Invocation, Platform};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandType, Event, Http,
    Interaction,
};
use std::sync::Arc;

/// The Discord platform as exposed by serenity.
///
/// Handlers receive a [`DiscordClient`] wrapping serenity's context and the
/// raw gateway [`Event`]; command handlers receive the [`CommandInteraction`]
/// directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discord;

impl Platform for Discord {
    type Client = DiscordClient;
    type Event = Event;
    type Interaction = CommandInteraction;
    type Handle = Arc<Http>;

    fn event_kind(event: &Event) -> EventKind {
        match event {
            Event::Ready(_) => EventKind::Ready,
            Event::Resumed(_) => EventKind::Resumed,
            Event::InteractionCreate(_) => EventKind::InteractionCreate,
            Event::MessageCreate(_) => EventKind::MessageCreate,
            Event::MessageUpdate(_) => EventKind::MessageUpdate,
            Event::MessageDelete(_) => EventKind::MessageDelete,
            Event::ReactionAdd(_) => EventKind::ReactionAdd,
            Event::ReactionRemove(_) => EventKind::ReactionRemove,
            Event::GuildCreate(_) => EventKind::GuildCreate,
            Event::GuildDelete(_) => EventKind::GuildDelete,
            Event::GuildMemberAdd(_) => EventKind::GuildMemberAdd,
            Event::GuildMemberRemove(_) => EventKind::GuildMemberRemove,
            Event::GuildMemberUpdate(_) => EventKind::GuildMemberUpdate,
            Event::ChannelCreate(_) => EventKind::ChannelCreate,
            Event::ChannelDelete(_) => EventKind::ChannelDelete,
            Event::VoiceStateUpdate(_) => EventKind::VoiceStateUpdate,
            Event::PresenceUpdate(_) => EventKind::PresenceUpdate,
            Event::TypingStart(_) => EventKind::TypingStart,
            _ => EventKind::Other,
        }
    }

    fn chat_input(event: &Event) -> Option<&CommandInteraction> {
        match event {
            Event::InteractionCreate(create) => match &create.interaction {
                Interaction::Command(command) if command.data.kind == CommandType::ChatInput => {
                    Some(command)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn invocation(interaction: &CommandInteraction) -> Invocation<'_> {
        let (group, subcommand) = subcommand_path(&interaction.data.options);
        Invocation {
            command: &interaction.data.name,
            group,
            subcommand,
        }
    }
}

/// Read the (group, subcommand) pair named by an interaction's options.
///
/// Only the first option can carry a subcommand or group. A group is
/// reported without a subcommand when its nested list names none.
pub fn subcommand_path(options: &[CommandDataOption]) -> (Option<&str>, Option<&str>) {
    match options.first() {
        Some(first) => match &first.value {
            CommandDataOptionValue::SubCommandGroup(inner) => {
                let subcommand = inner
                    .iter()
                    .find(|option| matches!(option.value, CommandDataOptionValue::SubCommand(_)))
                    .map(|option| option.name.as_str());
                (Some(first.name.as_str()), subcommand)
            }
            CommandDataOptionValue::SubCommand(_) => (None, Some(first.name.as_str())),
            _ => (None, None),
        },
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: serde_json::Value) -> Vec<CommandDataOption> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flat_options_name_no_path() {
        let opts = options(json!([{ "name": "loud", "type": 5, "value": true }]));
        assert_eq!(subcommand_path(&opts), (None, None));
        assert_eq!(subcommand_path(&[]), (None, None));
    }

    #[test]
    fn test_subcommand_path() {
        let opts = options(json!([{ "name": "warn", "type": 1, "options": [] }]));
        assert_eq!(subcommand_path(&opts), (None, Some("warn")));
    }

    #[test]
    fn test_grouped_subcommand_path() {
        let opts = options(json!([{
            "name": "admin",
            "type": 2,
            "options": [{ "name": "ban", "type": 1, "options": [] }]
        }]));
        assert_eq!(subcommand_path(&opts), (Some("admin"), Some("ban")));
    }
}
