//! Command schema: the caller's description of a slash command.
//!
//! A command is either flat (an ordered list of options and an optional
//! handler) or a tree of subcommands and subcommand groups. The two shapes
//! are checked for exclusivity when the command is translated.
//!
//! # Examples
//!
//! ```rust,ignore
//! use octa_core::{Command, CommandOption, Subcommand, SubcommandGroup};
//!
//! let ping = Command::new("ping", "pong")
//!     .option("loud", CommandOption::boolean("volume"))
//!     .handler(|client, interaction| async move { Ok(()) });
//!
//! let admin = Command::new("mod", "moderation tools").group(
//!     "admin",
//!     SubcommandGroup::new("admin actions").subcommand(
//!         "ban",
//!         Subcommand::new("ban a user")
//!             .option("target", CommandOption::user("who").require())
//!             .handler(|client, interaction| async move { Ok(()) }),
//!     ),
//! );
//! ```

use crate::{CommandHandler, CommandOption, Platform, command_handler};
use octa_error::HandlerResult;
use std::fmt;
use std::future::Future;

/// A subcommand: description, options, and an optional handler.
pub struct Subcommand<P: Platform> {
    pub(crate) description: String,
    pub(crate) options: Vec<(String, CommandOption)>,
    pub(crate) handler: Option<CommandHandler<P>>,
}

impl<P: Platform> Subcommand<P> {
    /// Create a subcommand with no options and no handler.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: Vec::new(),
            handler: None,
        }
    }

    /// Append an option.
    pub fn option(mut self, name: impl Into<String>, option: CommandOption) -> Self {
        self.options.push((name.into(), option));
        self
    }

    /// Bind an async handler.
    pub fn handler<F, Fut>(self, f: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler_ref(command_handler::<P, _, _>(f))
    }

    /// Bind an already wrapped handler.
    pub fn handler_ref(mut self, handler: CommandHandler<P>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[(String, CommandOption)] {
        &self.options
    }
}

impl<P: Platform> fmt::Debug for Subcommand<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommand")
            .field("description", &self.description)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// A named group of subcommands.
pub struct SubcommandGroup<P: Platform> {
    pub(crate) description: String,
    pub(crate) subcommands: Vec<(String, Subcommand<P>)>,
}

impl<P: Platform> SubcommandGroup<P> {
    /// Create an empty group.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            subcommands: Vec::new(),
        }
    }

    /// Append a subcommand.
    pub fn subcommand(mut self, name: impl Into<String>, subcommand: Subcommand<P>) -> Self {
        self.subcommands.push((name.into(), subcommand));
        self
    }

    /// Help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Subcommands in declaration order.
    pub fn subcommands(&self) -> &[(String, Subcommand<P>)] {
        &self.subcommands
    }
}

impl<P: Platform> fmt::Debug for SubcommandGroup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubcommandGroup")
            .field("description", &self.description)
            .field("subcommands", &self.subcommands)
            .finish()
    }
}

/// A top-level slash command.
pub struct Command<P: Platform> {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) handler: Option<CommandHandler<P>>,
    pub(crate) options: Vec<(String, CommandOption)>,
    pub(crate) subcommands: Vec<(String, Subcommand<P>)>,
    pub(crate) groups: Vec<(String, SubcommandGroup<P>)>,
    pub(crate) dm_permission: Option<bool>,
    pub(crate) default_member_permissions: Option<u64>,
    pub(crate) nsfw: bool,
    pub(crate) guild: Option<u64>,
}

impl<P: Platform> Command<P> {
    /// Create a bare command.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: None,
            options: Vec::new(),
            subcommands: Vec::new(),
            groups: Vec::new(),
            dm_permission: None,
            default_member_permissions: None,
            nsfw: false,
            guild: None,
        }
    }

    /// Append an option to a flat command.
    pub fn option(mut self, name: impl Into<String>, option: CommandOption) -> Self {
        self.options.push((name.into(), option));
        self
    }

    /// Append a subcommand.
    pub fn subcommand(mut self, name: impl Into<String>, subcommand: Subcommand<P>) -> Self {
        self.subcommands.push((name.into(), subcommand));
        self
    }

    /// Append a subcommand group.
    pub fn group(mut self, name: impl Into<String>, group: SubcommandGroup<P>) -> Self {
        self.groups.push((name.into(), group));
        self
    }

    /// Bind the handler of a flat command.
    pub fn handler<F, Fut>(self, f: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler_ref(command_handler::<P, _, _>(f))
    }

    /// Bind an already wrapped handler.
    pub fn handler_ref(mut self, handler: CommandHandler<P>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Whether the command is usable in direct messages.
    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Permission bits a member needs by default.
    pub fn default_member_permissions(mut self, bits: u64) -> Self {
        self.default_member_permissions = Some(bits);
        self
    }

    /// Mark the command age-restricted.
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }

    /// Register the command in one guild instead of globally.
    pub fn guild(mut self, guild_id: u64) -> Self {
        self.guild = Some(guild_id);
        self
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Guild scope, if any.
    pub fn guild_id(&self) -> Option<u64> {
        self.guild
    }

    /// True when the command declares subcommands or groups.
    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty() || !self.groups.is_empty()
    }
}

impl<P: Platform> fmt::Debug for Command<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("handler", &self.handler.is_some())
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("groups", &self.groups)
            .field("dm_permission", &self.dm_permission)
            .field("default_member_permissions", &self.default_member_permissions)
            .field("nsfw", &self.nsfw)
            .field("guild", &self.guild)
            .finish()
    }
}
