//! Event listeners and the fluent registry that collects them.

use crate::{DispatchTable, EventHandler, Platform, event_handler};
use futures::future::BoxFuture;
use octa_error::HandlerResult;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Gateway events a listener can subscribe to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Session established; fires once per (re)connect
    Ready,
    /// Session resumed after a reconnect
    Resumed,
    /// Slash command, component, autocomplete, or modal interaction
    InteractionCreate,
    /// Message posted
    MessageCreate,
    /// Message edited
    MessageUpdate,
    /// Message deleted
    MessageDelete,
    /// Reaction added
    ReactionAdd,
    /// Reaction removed
    ReactionRemove,
    /// Guild became available or was joined
    GuildCreate,
    /// Guild became unavailable or was left
    GuildDelete,
    /// Member joined a guild
    GuildMemberAdd,
    /// Member left a guild
    GuildMemberRemove,
    /// Member changed
    GuildMemberUpdate,
    /// Channel created
    ChannelCreate,
    /// Channel deleted
    ChannelDelete,
    /// Voice state changed
    VoiceStateUpdate,
    /// Presence changed
    PresenceUpdate,
    /// User started typing
    TypingStart,
    /// Any event without a dedicated kind
    Other,
}

/// A handler subscribed to one event kind.
pub struct EventListener<P: Platform> {
    kind: EventKind,
    handler: EventHandler<P>,
    once: bool,
    label: String,
}

impl<P: Platform> EventListener<P> {
    /// Listener from an already wrapped handler.
    pub fn new(kind: EventKind, handler: EventHandler<P>, once: bool) -> Self {
        Self {
            kind,
            handler,
            once,
            label: kind.to_string(),
        }
    }

    /// Listener that fires on every occurrence.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let greet = EventListener::on(EventKind::GuildMemberAdd, |client, event| async move {
    ///     tracing::info!("member joined");
    ///     Ok(())
    /// });
    /// ```
    pub fn on<F, Fut>(kind: EventKind, f: F) -> Self
    where
        F: Fn(P::Client, P::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(kind, event_handler::<P, _, _>(f), false)
    }

    /// Listener that fires only for the first occurrence.
    pub fn once<F, Fut>(kind: EventKind, f: F) -> Self
    where
        F: Fn(P::Client, P::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(kind, event_handler::<P, _, _>(f), true)
    }

    /// Listener routing chat-input interactions through a command's dispatch table.
    pub fn for_command(table: DispatchTable<P>) -> Self {
        let label = format!("{}:/{}", EventKind::InteractionCreate, table.command());
        let table = Arc::new(table);
        let handler: EventHandler<P> = Arc::new(
            move |client: P::Client, event: P::Event| -> BoxFuture<'static, HandlerResult> {
                let table = Arc::clone(&table);
                Box::pin(async move { table.route(client, &event).await })
            },
        );
        Self::new(EventKind::InteractionCreate, handler, false).labeled(label)
    }

    /// Replace the label used in logs.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Subscribed event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether the listener fires only once.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Label used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn into_parts(self) -> (EventKind, EventHandler<P>, bool, String) {
        (self.kind, self.handler, self.once, self.label)
    }
}

impl<P: Platform> Clone for EventListener<P> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            handler: Arc::clone(&self.handler),
            once: self.once,
            label: self.label.clone(),
        }
    }
}

impl<P: Platform> fmt::Debug for EventListener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("kind", &self.kind)
            .field("once", &self.once)
            .field("label", &self.label)
            .finish()
    }
}

/// Ordered accumulator of listeners.
///
/// # Examples
///
/// ```rust,ignore
/// let builder = EventBuilder::new()
///     .register(EventListener::on(EventKind::MessageCreate, on_message))
///     .register(EventListener::once(EventKind::Ready, on_ready));
/// assert_eq!(builder.len(), 2);
/// ```
pub struct EventBuilder<P: Platform> {
    listeners: Vec<EventListener<P>>,
}

impl<P: Platform> EventBuilder<P> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener.
    pub fn register(mut self, listener: EventListener<P>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Listeners in registration order.
    pub fn listeners(&self) -> &[EventListener<P>] {
        &self.listeners
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listener was registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Consume the registry.
    pub fn into_listeners(self) -> Vec<EventListener<P>> {
        self.listeners
    }
}

impl<P: Platform> Default for EventBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> fmt::Debug for EventBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.listeners).finish()
    }
}
