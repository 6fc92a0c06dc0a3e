//! Wire payloads for Discord's application-command registration endpoint.
//!
//! These structs serialize to exactly the JSON body the bulk-overwrite
//! endpoints accept. Optional fields are skipped when unset so the payload
//! only carries the constraints the caller declared.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

/// Application command type code for slash commands.
pub const CHAT_INPUT: u8 = 1;

/// Discord option type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[repr(u8)]
pub enum OptionType {
    /// Nested subcommand
    SubCommand = 1,
    /// Nested subcommand group
    SubCommandGroup = 2,
    /// String value
    String = 3,
    /// Integer value
    Integer = 4,
    /// Boolean value
    Boolean = 5,
    /// User value
    User = 6,
    /// Channel value
    Channel = 7,
    /// Role value
    Role = 8,
    /// User or role value
    Mentionable = 9,
    /// Double value
    Number = 10,
    /// File upload
    Attachment = 11,
}

impl OptionType {
    /// Numeric wire code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OptionType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => OptionType::SubCommand,
            2 => OptionType::SubCommandGroup,
            3 => OptionType::String,
            4 => OptionType::Integer,
            5 => OptionType::Boolean,
            6 => OptionType::User,
            7 => OptionType::Channel,
            8 => OptionType::Role,
            9 => OptionType::Mentionable,
            10 => OptionType::Number,
            11 => OptionType::Attachment,
            other => return Err(other),
        })
    }
}

/// A choice as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePayload {
    /// Label shown in the client
    pub name: String,
    /// String or numeric value
    pub value: JsonValue,
}

/// One option, subcommand, or subcommand group as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OptionPayload {
    /// Option type code
    #[serde(rename = "type")]
    kind: u8,
    /// Option name
    name: String,
    /// Help text
    description: String,
    /// Required flag; absent on subcommands and groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    /// Fixed choices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<ChoicePayload>>,
    /// Nested options of a subcommand or group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<OptionPayload>,
    /// Allowed channel type codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_types: Option<Vec<u8>>,
    /// Lower numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_value: Option<Number>,
    /// Upper numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_value: Option<Number>,
    /// Lower string length bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_length: Option<u16>,
    /// Upper string length bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<u16>,
    /// Autocomplete flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autocomplete: Option<bool>,
}

impl OptionPayload {
    /// Start a payload of the given type with no constraints.
    pub fn new(kind: OptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.code(),
            name: name.into(),
            description: description.into(),
            required: None,
            choices: None,
            options: Vec::new(),
            channel_types: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            autocomplete: None,
        }
    }

    /// Decoded option type, if the code is known.
    pub fn option_type(&self) -> Option<OptionType> {
        OptionType::try_from(self.kind).ok()
    }

    pub(crate) fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub(crate) fn with_choices(mut self, choices: Vec<ChoicePayload>) -> Self {
        if !choices.is_empty() {
            self.choices = Some(choices);
        }
        self
    }

    pub(crate) fn with_options(mut self, options: Vec<OptionPayload>) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn with_channel_types(mut self, channel_types: Vec<u8>) -> Self {
        if !channel_types.is_empty() {
            self.channel_types = Some(channel_types);
        }
        self
    }

    pub(crate) fn with_bounds(mut self, min: Option<Number>, max: Option<Number>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub(crate) fn with_lengths(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub(crate) fn with_autocomplete(mut self, autocomplete: Option<bool>) -> Self {
        self.autocomplete = autocomplete;
        self
    }
}

/// A slash command as sent on the wire.
///
/// # Examples
///
/// ```
/// use octa_core::CommandPayload;
///
/// let payload = CommandPayload::new("ping", "pong");
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["type"], 1);
/// assert_eq!(json["nsfw"], false);
/// assert!(json.get("options").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CommandPayload {
    /// Command name
    name: String,
    /// Help text
    description: String,
    /// Command type code, always chat input
    #[serde(rename = "type")]
    kind: u8,
    /// Options, subcommands, or groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<OptionPayload>,
    /// Permission bits as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_member_permissions: Option<String>,
    /// Whether the command is usable in direct messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dm_permission: Option<bool>,
    /// Age-restricted flag
    #[serde(default)]
    nsfw: bool,
}

impl CommandPayload {
    /// Bare chat-input command payload.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: CHAT_INPUT,
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
            nsfw: false,
        }
    }

    /// Find a top-level option by name.
    pub fn option(&self, name: &str) -> Option<&OptionPayload> {
        self.options.iter().find(|option| option.name == name)
    }

    pub(crate) fn with_options(mut self, options: Vec<OptionPayload>) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn with_permissions(
        mut self,
        dm_permission: Option<bool>,
        default_member_permissions: Option<u64>,
    ) -> Self {
        self.dm_permission = dm_permission;
        self.default_member_permissions = default_member_permissions.map(|bits| bits.to_string());
        self
    }

    pub(crate) fn with_nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }
}
