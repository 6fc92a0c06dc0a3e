//! Translation of command schemas into wire payloads and dispatch tables.
//!
//! Validation happens here, before anything reaches the registration
//! endpoint, so a malformed schema fails at construction time with a
//! descriptive error instead of a rejected REST call after login.

use crate::{
    ChoicePayload, Command, CommandOption, CommandPath, CommandPayload, DispatchTable,
    NumericConstraints, OptionKind, OptionPayload, OptionType, Platform, Subcommand,
};
use octa_error::{SchemaError, SchemaErrorKind};
use serde_json::{Number, Value as JsonValue};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Longest accepted command, option, or choice name.
pub const MAX_NAME_LEN: usize = 32;
/// Longest accepted description.
pub const MAX_DESCRIPTION_LEN: usize = 100;
/// Most options, subcommands, groups, or choices at one level.
pub const MAX_ENTRIES: usize = 25;
/// Longest string length bound.
pub const MAX_STRING_LEN: u16 = 6000;

/// Result of translating one command.
#[derive(Debug)]
pub struct TranslatedCommand<P: Platform> {
    /// Body for the registration endpoint
    pub payload: CommandPayload,
    /// Handlers keyed by subcommand path
    pub routes: DispatchTable<P>,
    /// Guild scope, `None` for global commands
    pub guild: Option<u64>,
}

/// Translate a command schema.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the command mixes options (or a root
/// handler) with subcommands, or when a name, description, limit, or
/// constraint is invalid.
#[instrument(skip(command), fields(command = %command.name))]
pub fn translate<P: Platform>(command: Command<P>) -> Result<TranslatedCommand<P>, SchemaError> {
    check_name(&command.name)?;
    check_description(&command.name, &command.description)?;

    if command.has_subcommands() && (!command.options.is_empty() || command.handler.is_some()) {
        return Err(SchemaError::new(SchemaErrorKind::ConflictingShape(
            command.name.clone(),
        )));
    }

    let mut routes = DispatchTable::new(command.name.clone());
    let options = if command.has_subcommands() {
        translate_tree(&command, &mut routes)?
    } else {
        if let Some(handler) = command.handler.clone() {
            routes.insert(CommandPath::Root, Some(handler));
        }
        translate_options(&command.name, &command.options)?
    };

    let payload = CommandPayload::new(command.name.clone(), command.description.clone())
        .with_options(options)
        .with_permissions(command.dm_permission, command.default_member_permissions)
        .with_nsfw(command.nsfw);

    debug!(
        options = payload.options().len(),
        routes = routes.len(),
        guild = ?command.guild,
        "Translated command"
    );

    Ok(TranslatedCommand {
        payload,
        routes,
        guild: command.guild,
    })
}

fn translate_tree<P: Platform>(
    command: &Command<P>,
    routes: &mut DispatchTable<P>,
) -> Result<Vec<OptionPayload>, SchemaError> {
    let entries = command.subcommands.len() + command.groups.len();
    check_count(&command.name, "subcommands and groups", entries)?;

    let mut seen = HashSet::new();
    let mut payloads = Vec::with_capacity(entries);

    for (name, subcommand) in &command.subcommands {
        check_unique(&command.name, name, &mut seen)?;
        payloads.push(translate_subcommand(name, subcommand)?);
        routes.insert(CommandPath::Subcommand(name.clone()), subcommand.handler.clone());
    }

    for (group_name, group) in &command.groups {
        check_unique(&command.name, group_name, &mut seen)?;
        check_name(group_name)?;
        check_description(group_name, &group.description)?;
        if group.subcommands.is_empty() {
            return Err(SchemaError::new(SchemaErrorKind::EmptyGroup(
                group_name.clone(),
            )));
        }
        check_count(group_name, "subcommands", group.subcommands.len())?;

        let mut group_seen = HashSet::new();
        let mut nested = Vec::with_capacity(group.subcommands.len());
        for (name, subcommand) in &group.subcommands {
            check_unique(group_name, name, &mut group_seen)?;
            nested.push(translate_subcommand(name, subcommand)?);
            routes.insert(
                CommandPath::Grouped {
                    group: group_name.clone(),
                    subcommand: name.clone(),
                },
                subcommand.handler.clone(),
            );
        }

        payloads.push(
            OptionPayload::new(
                OptionType::SubCommandGroup,
                group_name.clone(),
                group.description.clone(),
            )
            .with_options(nested),
        );
    }

    Ok(payloads)
}

fn translate_subcommand<P: Platform>(
    name: &str,
    subcommand: &Subcommand<P>,
) -> Result<OptionPayload, SchemaError> {
    check_name(name)?;
    check_description(name, &subcommand.description)?;
    let options = translate_options(name, &subcommand.options)?;
    Ok(
        OptionPayload::new(OptionType::SubCommand, name, subcommand.description.clone())
            .with_options(options),
    )
}

/// Translate an ordered option list, enforcing per-level rules.
pub fn translate_options(
    parent: &str,
    options: &[(String, CommandOption)],
) -> Result<Vec<OptionPayload>, SchemaError> {
    check_count(parent, "options", options.len())?;

    let mut seen = HashSet::new();
    let mut optional_seen = false;
    let mut payloads = Vec::with_capacity(options.len());

    for (name, option) in options {
        check_unique(parent, name, &mut seen)?;
        if option.required() && optional_seen {
            return Err(SchemaError::new(SchemaErrorKind::RequiredAfterOptional {
                parent: parent.to_string(),
                option: name.clone(),
            }));
        }
        optional_seen |= !option.required();
        payloads.push(translate_option(name, option)?);
    }

    Ok(payloads)
}

/// Translate a single option, applying kind-specific rules.
pub fn translate_option(name: &str, option: &CommandOption) -> Result<OptionPayload, SchemaError> {
    check_name(name)?;
    check_description(name, option.description())?;

    let payload = match option.kind() {
        OptionKind::Boolean => OptionPayload::new(OptionType::Boolean, name, option.description()),
        OptionKind::User => OptionPayload::new(OptionType::User, name, option.description()),
        OptionKind::Role => OptionPayload::new(OptionType::Role, name, option.description()),
        OptionKind::Attachment => {
            OptionPayload::new(OptionType::Attachment, name, option.description())
        }
        OptionKind::Mentionable => {
            OptionPayload::new(OptionType::Mentionable, name, option.description())
        }
        OptionKind::Channel(constraints) => {
            let mut seen = HashSet::new();
            let codes: Vec<u8> = constraints
                .channel_types
                .iter()
                .map(|kind| kind.code())
                .filter(|code| seen.insert(*code))
                .collect();
            OptionPayload::new(OptionType::Channel, name, option.description())
                .with_channel_types(codes)
        }
        OptionKind::Integer(constraints) => numeric(
            OptionPayload::new(OptionType::Integer, name, option.description()),
            name,
            constraints,
            |value| Some(Number::from(value)),
        )?,
        OptionKind::Number(constraints) => numeric(
            OptionPayload::new(OptionType::Number, name, option.description()),
            name,
            constraints,
            Number::from_f64,
        )?,
        OptionKind::String(constraints) => {
            if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
                if min > max {
                    return Err(constraint(
                        name,
                        format!("min_length {} exceeds max_length {}", min, max),
                    ));
                }
            }
            for bound in [constraints.min_length, constraints.max_length].into_iter().flatten() {
                if bound > MAX_STRING_LEN {
                    return Err(constraint(
                        name,
                        format!("length bound {} exceeds {}", bound, MAX_STRING_LEN),
                    ));
                }
            }
            check_choices(name, constraints.choices.len(), constraints.autocomplete)?;
            let mut choices = Vec::with_capacity(constraints.choices.len());
            for choice in &constraints.choices {
                check_choice_name(name, &choice.name)?;
                choices.push(ChoicePayload {
                    name: choice.name.clone(),
                    value: JsonValue::String(choice.value.clone()),
                });
            }
            OptionPayload::new(OptionType::String, name, option.description())
                .with_choices(choices)
                .with_lengths(constraints.min_length, constraints.max_length)
                .with_autocomplete(constraints.autocomplete)
        }
    };

    Ok(payload.with_required(option.required()))
}

fn numeric<T>(
    payload: OptionPayload,
    name: &str,
    constraints: &NumericConstraints<T>,
    to_number: impl Fn(T) -> Option<Number>,
) -> Result<OptionPayload, SchemaError>
where
    T: Copy + PartialOrd + std::fmt::Display,
{
    if let (Some(min), Some(max)) = (constraints.min_value, constraints.max_value) {
        if min > max {
            return Err(constraint(
                name,
                format!("min_value {} exceeds max_value {}", min, max),
            ));
        }
    }
    check_choices(name, constraints.choices.len(), constraints.autocomplete)?;

    let finite = |value: T| {
        to_number(value)
            .ok_or_else(|| constraint(name, format!("{} is not a finite number", value)))
    };

    let min = constraints.min_value.map(&finite).transpose()?;
    let max = constraints.max_value.map(&finite).transpose()?;

    let mut choices = Vec::with_capacity(constraints.choices.len());
    for choice in &constraints.choices {
        check_choice_name(name, &choice.name)?;
        choices.push(ChoicePayload {
            name: choice.name.clone(),
            value: JsonValue::Number(finite(choice.value)?),
        });
    }

    Ok(payload
        .with_bounds(min, max)
        .with_choices(choices)
        .with_autocomplete(constraints.autocomplete))
}

fn constraint(option: &str, reason: String) -> SchemaError {
    SchemaError::new(SchemaErrorKind::InvalidConstraint {
        option: option.to_string(),
        reason,
    })
}

fn check_choices(
    option: &str,
    count: usize,
    autocomplete: Option<bool>,
) -> Result<(), SchemaError> {
    check_count(option, "choices", count)?;
    if count > 0 && autocomplete == Some(true) {
        return Err(constraint(
            option,
            "autocomplete cannot be combined with choices".to_string(),
        ));
    }
    Ok(())
}

fn check_choice_name(option: &str, name: &str) -> Result<(), SchemaError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(constraint(
            option,
            format!("choice name '{}' must be 1-{} characters", name, MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

fn check_count(parent: &str, what: &'static str, count: usize) -> Result<(), SchemaError> {
    if count > MAX_ENTRIES {
        return Err(SchemaError::new(SchemaErrorKind::TooMany {
            parent: parent.to_string(),
            what,
            count,
            limit: MAX_ENTRIES,
        }));
    }
    Ok(())
}

fn check_unique(parent: &str, name: &str, seen: &mut HashSet<String>) -> Result<(), SchemaError> {
    if !seen.insert(name.to_string()) {
        return Err(SchemaError::new(SchemaErrorKind::DuplicateName {
            parent: parent.to_string(),
            name: name.to_string(),
        }));
    }
    Ok(())
}

/// Check a command, subcommand, group, or option name.
pub fn check_name(name: &str) -> Result<(), SchemaError> {
    let invalid = |reason: &str| {
        SchemaError::new(SchemaErrorKind::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    let len = name.chars().count();
    if len == 0 {
        return Err(invalid("name is empty"));
    }
    if len > MAX_NAME_LEN {
        return Err(invalid("name is longer than 32 characters"));
    }
    if !name.chars().all(is_name_char) {
        return Err(invalid(
            "only lowercase or caseless letters, digits, '-' and '_' are allowed",
        ));
    }
    Ok(())
}

/// Lowercase and caseless letters both pass, so Hangul names are accepted
/// next to lowercase Latin or Cyrillic ones.
fn is_name_char(c: char) -> bool {
    c == '-' || c == '_' || (c.is_alphanumeric() && c.to_lowercase().eq([c]))
}

fn check_description(owner: &str, description: &str) -> Result<(), SchemaError> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(SchemaError::new(SchemaErrorKind::InvalidDescription {
            owner: owner.to_string(),
            reason: format!("must be 1-{} characters, got {}", MAX_DESCRIPTION_LEN, len),
        }));
    }
    Ok(())
}
