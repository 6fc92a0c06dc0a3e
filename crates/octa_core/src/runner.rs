//! Bootstrap: an ordered work queue finalized into an immutable plan.
//!
//! [`BotBuilder`] collects setup steps through fluent calls. [`BotBuilder::build`]
//! freezes them into a [`BotPlan`], which runs every step in insertion order,
//! awaiting each, before handing the dispatcher to the gateway. Listeners are
//! therefore always attached before login can trigger the ready event.

use crate::{
    Command, CommandPayload, CommandRegistrar, Dispatcher, EventBuilder, EventHandler, EventKind,
    EventListener, Gateway, Platform, RawJob, event_handler, raw_job, translate,
};
use futures::future::BoxFuture;
use octa_error::{
    DispatchError, DispatchErrorKind, HandlerResult, JobError, OctaResult, SchemaError,
};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Deferred listener batch producer.
pub type EventsFn<P> = Box<dyn FnOnce(EventBuilder<P>) -> EventBuilder<P> + Send>;

/// A deferred setup step.
pub enum WorkItem<P: Platform> {
    /// Attach every listener produced by the closure
    Events(EventsFn<P>),
    /// Attach a single listener
    Event(EventListener<P>),
    /// Run an arbitrary async job with the pre-login handle
    RawJob(RawJob<P>),
}

/// Kind tag of a [`WorkItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkKind {
    /// Listener batch
    Events,
    /// Single listener
    Event,
    /// Arbitrary job
    RawJob,
}

impl<P: Platform> WorkItem<P> {
    /// Kind tag.
    pub fn kind(&self) -> WorkKind {
        match self {
            WorkItem::Events(_) => WorkKind::Events,
            WorkItem::Event(_) => WorkKind::Event,
            WorkItem::RawJob(_) => WorkKind::RawJob,
        }
    }
}

impl<P: Platform> fmt::Debug for WorkItem<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkItem::Event(listener) => f.debug_tuple("Event").field(listener).finish(),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Command payloads waiting for the ready signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSet {
    global: Vec<CommandPayload>,
    guilds: BTreeMap<u64, Vec<CommandPayload>>,
}

impl CommandSet {
    /// Global command payloads in registration order.
    pub fn global(&self) -> &[CommandPayload] {
        &self.global
    }

    /// Guild-scoped payloads, keyed by guild id.
    pub fn guilds(&self) -> &BTreeMap<u64, Vec<CommandPayload>> {
        &self.guilds
    }

    fn add(&mut self, guild: Option<u64>, payload: CommandPayload) {
        match guild {
            Some(guild_id) => self.guilds.entry(guild_id).or_default().push(payload),
            None => self.global.push(payload),
        }
    }

    /// Push the global set, then each guild's set, one call per scope.
    ///
    /// The global call is always made so an empty set clears stale commands.
    /// Failures are not retried.
    #[instrument(skip_all, fields(global = self.global.len(), guilds = self.guilds.len()))]
    pub async fn push<R: CommandRegistrar + ?Sized>(
        &self,
        registrar: &R,
    ) -> Result<(), DispatchError> {
        registrar.register_global(&self.global).await.map_err(|e| {
            error!(error = %e, "Global command registration failed");
            DispatchError::new(DispatchErrorKind::RegistrationFailed {
                scope: "global".to_string(),
                reason: e.to_string(),
            })
        })?;
        info!(count = self.global.len(), "Registered global commands");

        for (guild_id, commands) in &self.guilds {
            registrar
                .register_guild(*guild_id, commands)
                .await
                .map_err(|e| {
                    error!(guild_id, error = %e, "Guild command registration failed");
                    DispatchError::new(DispatchErrorKind::RegistrationFailed {
                        scope: format!("guild {}", guild_id),
                        reason: e.to_string(),
                    })
                })?;
            info!(guild_id, count = commands.len(), "Registered guild commands");
        }

        Ok(())
    }
}

/// Fluent accumulator of setup steps.
///
/// # Examples
///
/// ```rust,ignore
/// let plan = BotBuilder::<Discord>::new()
///     .catch_errors(true)
///     .command(ping)?
///     .event(EventListener::on(EventKind::MessageCreate, on_message))
///     .on_start(|client, ready| async move { Ok(()) }, true)
///     .build();
/// plan.run(gateway).await?;
/// ```
pub struct BotBuilder<P: Platform> {
    work: Vec<WorkItem<P>>,
    commands: CommandSet,
    catch_errors: bool,
}

impl<P: Platform> BotBuilder<P> {
    /// Empty builder; handler failures propagate by default.
    pub fn new() -> Self {
        Self {
            work: Vec::new(),
            commands: CommandSet::default(),
            catch_errors: false,
        }
    }

    /// Log and swallow handler failures instead of returning them.
    pub fn catch_errors(mut self, catch: bool) -> Self {
        self.catch_errors = catch;
        self
    }

    /// Queue a batch of listeners produced from a fresh [`EventBuilder`].
    pub fn events<F>(mut self, adder: F) -> Self
    where
        F: FnOnce(EventBuilder<P>) -> EventBuilder<P> + Send + 'static,
    {
        self.work.push(WorkItem::Events(Box::new(adder)));
        self
    }

    /// Queue a single listener.
    pub fn event(mut self, listener: EventListener<P>) -> Self {
        self.work.push(WorkItem::Event(listener));
        self
    }

    /// Translate a command, record its payload, and queue its interaction listener.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] raised by translation.
    pub fn command(mut self, command: Command<P>) -> Result<Self, SchemaError> {
        let translated = translate(command)?;
        debug!(
            command = %translated.payload.name(),
            guild = ?translated.guild,
            "Queued command"
        );
        self.commands.add(translated.guild, translated.payload);
        self.work
            .push(WorkItem::Event(EventListener::for_command(translated.routes)));
        Ok(self)
    }

    /// Queue an arbitrary async job run before login.
    pub fn run_raw_job<F, Fut>(mut self, job: F) -> Self
    where
        F: FnOnce(P::Handle) -> Fut + Send + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.work.push(WorkItem::RawJob(raw_job::<P, _, _>(job)));
        self
    }

    /// Queue a ready listener.
    pub fn on_start<F, Fut>(self, f: F, once: bool) -> Self
    where
        F: Fn(P::Client, P::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let listener = EventListener::new(EventKind::Ready, event_handler::<P, _, _>(f), once)
            .labeled("ready:on_start");
        self.event(listener)
    }

    /// Freeze the queue into an executable plan.
    pub fn build(self) -> BotPlan<P> {
        BotPlan {
            work: self.work,
            commands: self.commands,
            catch_errors: self.catch_errors,
        }
    }
}

impl<P: Platform> Default for BotBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> fmt::Debug for BotBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotBuilder")
            .field("work", &self.work)
            .field("commands", &self.commands)
            .field("catch_errors", &self.catch_errors)
            .finish()
    }
}

/// Immutable, ordered execution plan.
pub struct BotPlan<P: Platform> {
    work: Vec<WorkItem<P>>,
    commands: CommandSet,
    catch_errors: bool,
}

impl<P: Platform> BotPlan<P> {
    /// Kind tags of the queued steps, in execution order.
    pub fn work_kinds(&self) -> Vec<WorkKind> {
        self.work.iter().map(WorkItem::kind).collect()
    }

    /// Payloads pushed on ready.
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Global command payloads.
    pub fn global_commands(&self) -> &[CommandPayload] {
        self.commands.global()
    }

    /// Guild-scoped command payloads.
    pub fn guild_commands(&self) -> &BTreeMap<u64, Vec<CommandPayload>> {
        self.commands.guilds()
    }

    /// Execute the queue and build the dispatcher, without logging in.
    ///
    /// The command registration listener is attached last. It starts after
    /// every caller-supplied ready listener but does not wait for them, so a
    /// failing or long-running `on_start` handler cannot hold it back.
    ///
    /// # Errors
    ///
    /// Returns a [`JobError`] when a raw job fails; later steps do not run.
    #[instrument(skip_all, fields(steps = self.work.len()))]
    pub async fn prepare(self, handle: P::Handle) -> OctaResult<Dispatcher<P>> {
        let mut dispatcher = Dispatcher::new(self.catch_errors);

        for (index, item) in self.work.into_iter().enumerate() {
            debug!(index, kind = %item.kind(), "Running work item");
            match item {
                WorkItem::Events(adder) => {
                    for listener in adder(EventBuilder::new()).into_listeners() {
                        dispatcher.attach(listener);
                    }
                }
                WorkItem::Event(listener) => dispatcher.attach(listener),
                WorkItem::RawJob(job) => {
                    job(handle.clone()).await.map_err(|e| {
                        error!(index, error = %e, "Startup job failed");
                        JobError::new(index, e.to_string())
                    })?;
                }
            }
        }

        dispatcher.attach(registration_listener::<P>(self.commands));
        info!(subscriptions = dispatcher.len(), "Work queue drained");
        Ok(dispatcher)
    }

    /// Execute the queue, then log in through the gateway.
    ///
    /// # Errors
    ///
    /// Returns the first failing raw job, or the gateway's login error.
    #[instrument(skip_all)]
    pub async fn run<G: Gateway<P>>(self, gateway: G) -> OctaResult<()> {
        let dispatcher = self.prepare(gateway.handle()).await?;
        info!("Logging in");
        gateway.login(Arc::new(dispatcher)).await
    }
}

impl<P: Platform> fmt::Debug for BotPlan<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotPlan")
            .field("work", &self.work)
            .field("commands", &self.commands)
            .field("catch_errors", &self.catch_errors)
            .finish()
    }
}

fn registration_listener<P: Platform>(commands: CommandSet) -> EventListener<P> {
    let commands = Arc::new(commands);
    let handler: EventHandler<P> = Arc::new(
        move |client: P::Client, _event: P::Event| -> BoxFuture<'static, HandlerResult> {
            let commands = Arc::clone(&commands);
            Box::pin(async move {
                commands.push(&client).await?;
                Ok(())
            })
        },
    );
    EventListener::new(EventKind::Ready, handler, true).labeled("ready:register_commands")
}
