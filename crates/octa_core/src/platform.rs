//! The seam between the framework and the wrapped chat client.
//!
//! Everything in this crate is written against [`Platform`], so the
//! translation, dispatch, and bootstrap logic can run against an in-memory
//! fake as easily as against the real Discord client.

use crate::{CommandPath, CommandPayload, Dispatcher, EventKind};
use async_trait::async_trait;
use futures::future::BoxFuture;
use octa_error::{HandlerError, HandlerResult, OctaResult};
use std::future::Future;
use std::sync::Arc;

/// Types and event accessors of a wrapped chat client.
pub trait Platform: Send + Sync + Sized + 'static {
    /// Client handle passed to every handler.
    type Client: CommandRegistrar + Clone + Send + Sync + 'static;
    /// Native gateway event.
    type Event: Clone + Send + Sync + 'static;
    /// Native chat-input command interaction.
    type Interaction: Clone + Send + Sync + 'static;
    /// Pre-login handle given to raw startup jobs.
    type Handle: Clone + Send + Sync + 'static;

    /// Classify a native event.
    fn event_kind(event: &Self::Event) -> EventKind;

    /// Extract the chat-input command interaction carried by an event, if any.
    fn chat_input(event: &Self::Event) -> Option<&Self::Interaction>;

    /// Read the command name and subcommand path of an interaction.
    fn invocation(interaction: &Self::Interaction) -> Invocation<'_>;
}

/// Pushes command payloads to the platform's registration endpoint.
///
/// Both calls overwrite the full command set of their scope.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace the global command set.
    async fn register_global(&self, commands: &[CommandPayload]) -> Result<(), HandlerError>;

    /// Replace one guild's command set.
    async fn register_guild(
        &self,
        guild_id: u64,
        commands: &[CommandPayload],
    ) -> Result<(), HandlerError>;
}

/// Logs in and feeds gateway events into a dispatcher.
#[async_trait]
pub trait Gateway<P: Platform>: Send {
    /// Handle given to raw startup jobs before login.
    fn handle(&self) -> P::Handle;

    /// Connect and deliver events until the session ends.
    async fn login(self, dispatcher: Arc<Dispatcher<P>>) -> OctaResult<()>;
}

/// The command name and subcommand path named by an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Top-level command name
    pub command: &'a str,
    /// Subcommand group, when the interaction names one
    pub group: Option<&'a str>,
    /// Subcommand, when the interaction names one
    pub subcommand: Option<&'a str>,
}

impl<'a> Invocation<'a> {
    /// Invocation of a flat command.
    pub fn new(command: &'a str) -> Self {
        Self {
            command,
            group: None,
            subcommand: None,
        }
    }

    /// Resolve to a dispatch path.
    ///
    /// A group without a subcommand does not name a handler and yields `None`.
    pub fn path(&self) -> Option<CommandPath> {
        match (self.group, self.subcommand) {
            (None, None) => Some(CommandPath::Root),
            (None, Some(sub)) => Some(CommandPath::Subcommand(sub.to_string())),
            (Some(group), Some(sub)) => Some(CommandPath::Grouped {
                group: group.to_string(),
                subcommand: sub.to_string(),
            }),
            (Some(_), None) => None,
        }
    }
}

/// Handler bound to a command path.
pub type CommandHandler<P> = Arc<
    dyn Fn(
            <P as Platform>::Client,
            <P as Platform>::Interaction,
        ) -> BoxFuture<'static, HandlerResult>
        + Send
        + Sync,
>;

/// Handler subscribed to a gateway event.
pub type EventHandler<P> = Arc<
    dyn Fn(<P as Platform>::Client, <P as Platform>::Event) -> BoxFuture<'static, HandlerResult>
        + Send
        + Sync,
>;

/// One-shot startup job run before login.
pub type RawJob<P> =
    Box<dyn FnOnce(<P as Platform>::Handle) -> BoxFuture<'static, HandlerResult> + Send>;

/// Wrap an async closure as a [`CommandHandler`].
pub fn command_handler<P, F, Fut>(f: F) -> CommandHandler<P>
where
    P: Platform,
    F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(
        move |client: P::Client, interaction: P::Interaction| -> BoxFuture<'static, HandlerResult> {
            Box::pin(f(client, interaction))
        },
    )
}

/// Wrap an async closure as an [`EventHandler`].
pub fn event_handler<P, F, Fut>(f: F) -> EventHandler<P>
where
    P: Platform,
    F: Fn(P::Client, P::Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(
        move |client: P::Client, event: P::Event| -> BoxFuture<'static, HandlerResult> {
            Box::pin(f(client, event))
        },
    )
}

/// Wrap an async closure as a [`RawJob`].
pub fn raw_job<P, F, Fut>(f: F) -> RawJob<P>
where
    P: Platform,
    F: FnOnce(P::Handle) -> Fut + Send + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Box::new(move |handle: P::Handle| -> BoxFuture<'static, HandlerResult> {
        Box::pin(f(handle))
    })
}
