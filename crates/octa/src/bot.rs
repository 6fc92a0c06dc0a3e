//! The one-call bot entry point.

use crate::{OctaConfig, banner};
use octa_core::{BotBuilder, BotPlan, Command, EventBuilder, EventListener};
use octa_discord::serenity::all::{Event, Http};
use octa_discord::{Discord, DiscordClient, DiscordGateway, intents_for};
use octa_error::{HandlerResult, OctaResult};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument};

/// A Discord bot assembled from commands, listeners, and startup jobs.
///
/// Every call queues a step; nothing touches the network until
/// [`Octa::start`].
///
/// # Example
///
/// ```no_run
/// use octa::{Command, CommandOption, Discord, LoggingConfig, Octa, OctaConfig, init_logging};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = OctaConfig::load()?;
///     init_logging(&LoggingConfig::from(&config))?;
///
///     Octa::new(config)
///         .command(
///             Command::<Discord>::new("ping", "pong")
///                 .option("loud", CommandOption::boolean("volume"))
///                 .handler(|_ctx, _interaction| async move { Ok(()) }),
///         )?
///         .on_start(|_ctx, _ready| async move { Ok(()) }, true)
///         .start()
///         .await?;
///     Ok(())
/// }
/// ```
pub struct Octa {
    config: OctaConfig,
    builder: BotBuilder<Discord>,
}

impl Octa {
    /// Create a bot; logs the banner unless the configuration suppresses it.
    pub fn new(config: OctaConfig) -> Self {
        if *config.show_banner() {
            banner::show_banner();
        }
        let builder = BotBuilder::new().catch_errors(*config.catch_errors());
        Self { config, builder }
    }

    /// Load [`OctaConfig`] from the environment and create a bot.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn from_env() -> OctaResult<Self> {
        Ok(Self::new(OctaConfig::load()?))
    }

    /// Configuration this bot was created with.
    pub fn config(&self) -> &OctaConfig {
        &self.config
    }

    /// Queue a batch of listeners.
    pub fn events<F>(mut self, adder: F) -> Self
    where
        F: FnOnce(EventBuilder<Discord>) -> EventBuilder<Discord> + Send + 'static,
    {
        self.builder = self.builder.events(adder);
        self
    }

    /// Queue a single listener.
    pub fn event(mut self, listener: EventListener<Discord>) -> Self {
        self.builder = self.builder.event(listener);
        self
    }

    /// Translate and queue a slash command.
    ///
    /// # Errors
    ///
    /// Returns the schema error when the command is malformed.
    pub fn command(mut self, command: Command<Discord>) -> OctaResult<Self> {
        self.builder = self.builder.command(command)?;
        Ok(self)
    }

    /// Queue a job run with the REST handle before login.
    pub fn run_raw_job<F, Fut>(mut self, job: F) -> Self
    where
        F: FnOnce(Arc<Http>) -> Fut + Send + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.builder = self.builder.run_raw_job(job);
        self
    }

    /// Queue a ready listener.
    pub fn on_start<F, Fut>(mut self, f: F, once: bool) -> Self
    where
        F: Fn(DiscordClient, Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.builder = self.builder.on_start(f, once);
        self
    }

    /// Freeze the queued steps without starting.
    pub fn into_plan(self) -> BotPlan<Discord> {
        self.builder.build()
    }

    /// Run the queued steps in order, log in, and serve until the session ends.
    ///
    /// # Errors
    ///
    /// Returns an error when no token is configured, a startup job fails, or
    /// the gateway session fails.
    #[instrument(skip_all, fields(privileged = *self.config.privileged_intents()))]
    pub async fn start(self) -> OctaResult<()> {
        let token = self.config.bot_token()?;
        let intents = intents_for(*self.config.privileged_intents());
        let plan = self.builder.build();

        info!(
            global_commands = plan.global_commands().len(),
            guilds = plan.guild_commands().len(),
            "Starting bot"
        );
        plan.run(DiscordGateway::new(token, intents)).await
    }
}

impl std::fmt::Debug for Octa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Octa")
            .field("catch_errors", self.config.catch_errors())
            .field("builder", &self.builder)
            .finish()
    }
}
