//! Login and event delivery through serenity's client.

use crate::{Discord, DiscordClient};
use async_trait::async_trait;
use octa_core::{Dispatcher, Gateway};
use octa_error::{GatewayError, GatewayErrorKind, OctaResult};
use serenity::all::{Client, Context, Event, GatewayIntents, Http, RawEventHandler};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Serenity raw event handler feeding every event into the dispatcher.
struct DispatchHandler {
    dispatcher: Arc<Dispatcher<Discord>>,
}

#[async_trait]
impl RawEventHandler for DispatchHandler {
    async fn raw_event(&self, ctx: Context, ev: Event) {
        if let Event::Ready(ready) = &ev {
            // Registration calls need the application id.
            ctx.http.set_application_id(ready.ready.application.id);
            info!(
                bot_user = %ready.ready.user.name,
                bot_id = %ready.ready.user.id,
                guilds = ready.ready.guilds.len(),
                "Bot connected to Discord"
            );
        }

        if let Err(e) = self.dispatcher.dispatch(DiscordClient::new(ctx), ev).await {
            error!(error = %e, "Event dispatch failed");
        }
    }
}

/// Discord gateway session backed by a serenity [`Client`].
///
/// # Example
/// ```no_run
/// use octa_core::BotBuilder;
/// use octa_discord::{Discord, DiscordGateway, default_intents};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let plan = BotBuilder::<Discord>::new().build();
///     plan.run(DiscordGateway::new(token, default_intents())).await?;
///     Ok(())
/// }
/// ```
pub struct DiscordGateway {
    token: String,
    intents: GatewayIntents,
    http: Arc<Http>,
}

impl DiscordGateway {
    /// Create a gateway for the given bot token and intents.
    pub fn new(token: impl Into<String>, intents: GatewayIntents) -> Self {
        let token = token.into();
        let http = Arc::new(Http::new(&token));
        Self {
            token,
            intents,
            http,
        }
    }

    /// Intents requested at login.
    pub fn intents(&self) -> GatewayIntents {
        self.intents
    }
}

impl std::fmt::Debug for DiscordGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordGateway")
            .field("token_len", &self.token.len())
            .field("intents", &self.intents)
            .finish()
    }
}

#[async_trait]
impl Gateway<Discord> for DiscordGateway {
    fn handle(&self) -> Arc<Http> {
        Arc::clone(&self.http)
    }

    /// Build the serenity client and block until the session ends.
    #[instrument(skip_all, fields(token_len = self.token.len(), intents = ?self.intents))]
    async fn login(self, dispatcher: Arc<Dispatcher<Discord>>) -> OctaResult<()> {
        if self.token.trim().is_empty() {
            return Err(GatewayError::new(GatewayErrorKind::InvalidToken).into());
        }

        debug!(subscriptions = dispatcher.len(), "Building Serenity client");
        let mut client = Client::builder(&self.token, self.intents)
            .raw_event_handler(DispatchHandler { dispatcher })
            .await
            .map_err(|e| GatewayError::new(GatewayErrorKind::ClientBuild(e.to_string())))?;

        info!("Starting Discord session");
        client
            .start()
            .await
            .map_err(|e| GatewayError::new(GatewayErrorKind::ConnectionFailed(e.to_string())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octa_error::OctaErrorKind;

    #[tokio::test]
    async fn test_blank_token_is_rejected_before_connecting() {
        let gateway = DiscordGateway::new("   ", GatewayIntents::non_privileged());
        let err = gateway
            .login(Arc::new(Dispatcher::new(false)))
            .await
            .unwrap_err();

        match err.kind() {
            OctaErrorKind::Gateway(e) => assert_eq!(e.kind(), &GatewayErrorKind::InvalidToken),
            other => panic!("unexpected error: {}", other),
        }
    }
}
