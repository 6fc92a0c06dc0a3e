//! Dispatch tables mapping subcommand paths to handlers.

use crate::{CommandHandler, Platform};
use octa_error::HandlerResult;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument};

/// Location of a handler inside a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandPath {
    /// The flat command itself
    Root,
    /// A direct subcommand
    Subcommand(String),
    /// A subcommand inside a group
    Grouped {
        /// Group name
        group: String,
        /// Subcommand name
        subcommand: String,
    },
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandPath::Root => write!(f, "<root>"),
            CommandPath::Subcommand(sub) => write!(f, "{}", sub),
            CommandPath::Grouped { group, subcommand } => write!(f, "{} {}", group, subcommand),
        }
    }
}

/// Handlers of one command, keyed by path.
///
/// Every declared subcommand has an entry; entries without a handler route
/// to a no-op. Built once at translation time and read-only afterwards.
pub struct DispatchTable<P: Platform> {
    command: String,
    routes: HashMap<CommandPath, Option<CommandHandler<P>>>,
}

impl<P: Platform> DispatchTable<P> {
    /// Empty table for a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            routes: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, path: CommandPath, handler: Option<CommandHandler<P>>) {
        self.routes.insert(path, handler);
    }

    /// The command this table serves.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Handler bound to a path.
    pub fn resolve(&self, path: &CommandPath) -> Option<&CommandHandler<P>> {
        self.routes.get(path).and_then(Option::as_ref)
    }

    /// Whether a path is declared.
    pub fn contains(&self, path: &CommandPath) -> bool {
        self.routes.contains_key(path)
    }

    /// Whether a path is declared and has a handler.
    pub fn has_handler(&self, path: &CommandPath) -> bool {
        self.resolve(path).is_some()
    }

    /// All declared paths, sorted.
    pub fn paths(&self) -> Vec<&CommandPath> {
        let mut paths: Vec<_> = self.routes.keys().collect();
        paths.sort();
        paths
    }

    /// Number of declared paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no path is declared.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route an event to the handler it names.
    ///
    /// Events that are not chat-input interactions for this command, and
    /// paths without a handler, are ignored.
    #[instrument(skip_all, fields(command = %self.command))]
    pub async fn route(&self, client: P::Client, event: &P::Event) -> HandlerResult {
        let Some(interaction) = P::chat_input(event) else {
            return Ok(());
        };
        let invocation = P::invocation(interaction);
        if invocation.command != self.command {
            return Ok(());
        }

        let Some(path) = invocation.path() else {
            debug!(group = ?invocation.group, "Interaction names a group without a subcommand");
            return Ok(());
        };

        match self.resolve(&path) {
            Some(handler) => {
                debug!(%path, "Routing interaction");
                handler(client, interaction.clone()).await
            }
            None => {
                debug!(%path, "No handler bound to path");
                Ok(())
            }
        }
    }
}

impl<P: Platform> fmt::Debug for DispatchTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("command", &self.command)
            .field("paths", &self.paths())
            .finish()
    }
}
