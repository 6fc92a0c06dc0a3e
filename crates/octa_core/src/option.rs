//! Typed command options.
//!
//! Each option carries exactly one kind tag. Constraints live inside the
//! kind's variant, so numeric bounds can only be attached to numeric
//! options, length bounds only to strings, and channel filters only to
//! channel options.

use derive_getters::Getters;

/// A named choice offered to the user for an option value.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    /// Label shown in the client
    pub name: String,
    /// Value delivered with the interaction
    pub value: T,
}

impl<T> Choice<T> {
    /// Create a choice from a label and value.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Constraints shared by the integer and number (double) kinds.
///
/// # Examples
///
/// ```
/// use octa_core::NumericConstraints;
///
/// let volume = NumericConstraints::<i64>::default().min(0).max(11);
/// assert_eq!(volume.min_value, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumericConstraints<T> {
    /// Smallest accepted value
    pub min_value: Option<T>,
    /// Largest accepted value
    pub max_value: Option<T>,
    /// Fixed set of allowed values
    pub choices: Vec<Choice<T>>,
    /// Whether the client asks the bot for suggestions
    pub autocomplete: Option<bool>,
}

impl<T> Default for NumericConstraints<T> {
    fn default() -> Self {
        Self {
            min_value: None,
            max_value: None,
            choices: Vec::new(),
            autocomplete: None,
        }
    }
}

impl<T> NumericConstraints<T> {
    /// Set the lower bound.
    pub fn min(mut self, value: T) -> Self {
        self.min_value = Some(value);
        self
    }

    /// Set the upper bound.
    pub fn max(mut self, value: T) -> Self {
        self.max_value = Some(value);
        self
    }

    /// Append a choice.
    pub fn choice(mut self, name: impl Into<String>, value: T) -> Self {
        self.choices.push(Choice::new(name, value));
        self
    }

    /// Enable or disable autocomplete.
    pub fn autocomplete(mut self, enabled: bool) -> Self {
        self.autocomplete = Some(enabled);
        self
    }
}

/// Constraints for the string kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringConstraints {
    /// Fixed set of allowed values
    pub choices: Vec<Choice<String>>,
    /// Whether the client asks the bot for suggestions
    pub autocomplete: Option<bool>,
    /// Shortest accepted length
    pub min_length: Option<u16>,
    /// Longest accepted length
    pub max_length: Option<u16>,
}

impl StringConstraints {
    /// Append a choice.
    pub fn choice(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push(Choice::new(name, value.into()));
        self
    }

    /// Enable or disable autocomplete.
    pub fn autocomplete(mut self, enabled: bool) -> Self {
        self.autocomplete = Some(enabled);
        self
    }

    /// Set the minimum length.
    pub fn min_length(mut self, length: u16) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Set the maximum length.
    pub fn max_length(mut self, length: u16) -> Self {
        self.max_length = Some(length);
        self
    }
}

/// Guild channel kinds a channel option may be restricted to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Text channel
    Text,
    /// Voice channel
    Voice,
    /// Category
    Category,
    /// Announcement channel
    Announcement,
    /// Thread inside an announcement channel
    AnnouncementThread,
    /// Public thread
    PublicThread,
    /// Private thread
    PrivateThread,
    /// Stage channel
    StageVoice,
    /// Forum channel
    Forum,
    /// Media channel
    Media,
}

impl ChannelKind {
    /// Discord's numeric channel type code.
    pub fn code(self) -> u8 {
        match self {
            ChannelKind::Text => 0,
            ChannelKind::Voice => 2,
            ChannelKind::Category => 4,
            ChannelKind::Announcement => 5,
            ChannelKind::AnnouncementThread => 10,
            ChannelKind::PublicThread => 11,
            ChannelKind::PrivateThread => 12,
            ChannelKind::StageVoice => 13,
            ChannelKind::Forum => 15,
            ChannelKind::Media => 16,
        }
    }
}

/// Constraints for the channel kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelConstraints {
    /// Allowed channel kinds; empty means any
    pub channel_types: Vec<ChannelKind>,
}

impl ChannelConstraints {
    /// Restrict the option to the given channel kinds.
    pub fn only(kinds: impl IntoIterator<Item = ChannelKind>) -> Self {
        Self {
            channel_types: kinds.into_iter().collect(),
        }
    }
}

/// The value kind of an option, with its kind-specific constraints.
#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(
    name(OptionKindTag),
    derive(strum::Display, Hash),
    allow(missing_docs)
)]
pub enum OptionKind {
    /// True/false
    Boolean,
    /// Double-precision number
    Number(NumericConstraints<f64>),
    /// 64-bit integer
    Integer(NumericConstraints<i64>),
    /// Guild member or user
    User,
    /// Channel, optionally restricted by kind
    Channel(ChannelConstraints),
    /// Role
    Role,
    /// Uploaded file
    Attachment,
    /// User or role
    Mentionable,
    /// Free text
    String(StringConstraints),
}

/// A single typed option of a command or subcommand.
///
/// # Examples
///
/// ```
/// use octa_core::{CommandOption, NumericConstraints, OptionKind};
///
/// let loud = CommandOption::boolean("volume");
/// assert!(!loud.required());
///
/// let count = CommandOption::new(
///     "how many",
///     OptionKind::Integer(NumericConstraints::default().min(1).max(10)),
/// )
/// .required_if(true);
/// assert!(count.required());
/// ```
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct CommandOption {
    /// Help text shown in the client
    description: String,
    /// Whether the user must supply a value
    #[getter(skip)]
    required: bool,
    /// Kind tag and constraints
    kind: OptionKind,
}

impl CommandOption {
    /// Create an optional option of the given kind.
    pub fn new(description: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            description: description.into(),
            required: false,
            kind,
        }
    }

    /// Whether the user must supply a value.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Mark the option as required.
    pub fn require(self) -> Self {
        self.required_if(true)
    }

    /// Set the required flag.
    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Boolean option.
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(description, OptionKind::Boolean)
    }

    /// Number (double) option.
    pub fn number(description: impl Into<String>, constraints: NumericConstraints<f64>) -> Self {
        Self::new(description, OptionKind::Number(constraints))
    }

    /// Integer option.
    pub fn integer(description: impl Into<String>, constraints: NumericConstraints<i64>) -> Self {
        Self::new(description, OptionKind::Integer(constraints))
    }

    /// User option.
    pub fn user(description: impl Into<String>) -> Self {
        Self::new(description, OptionKind::User)
    }

    /// Channel option.
    pub fn channel(description: impl Into<String>, constraints: ChannelConstraints) -> Self {
        Self::new(description, OptionKind::Channel(constraints))
    }

    /// Role option.
    pub fn role(description: impl Into<String>) -> Self {
        Self::new(description, OptionKind::Role)
    }

    /// Attachment option.
    pub fn attachment(description: impl Into<String>) -> Self {
        Self::new(description, OptionKind::Attachment)
    }

    /// Mentionable (user or role) option.
    pub fn mentionable(description: impl Into<String>) -> Self {
        Self::new(description, OptionKind::Mentionable)
    }

    /// String option.
    pub fn string(description: impl Into<String>, constraints: StringConstraints) -> Self {
        Self::new(description, OptionKind::String(constraints))
    }

    /// The kind tag without constraints.
    pub fn tag(&self) -> OptionKindTag {
        OptionKindTag::from(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_drops_constraints() {
        let option = CommandOption::integer("count", NumericConstraints::default().min(1));
        assert_eq!(option.tag(), OptionKindTag::Integer);
        assert_eq!(CommandOption::boolean("flag").tag().to_string(), "Boolean");
    }
}
