//! Client handle given to Discord handlers.

use async_trait::async_trait;
use octa_core::{CommandPayload, CommandRegistrar};
use octa_error::HandlerError;
use serenity::all::{Context, GuildId};
use std::ops::Deref;
use tracing::{debug, instrument};

/// Serenity's [`Context`] as seen by command and event handlers.
///
/// Derefs to [`Context`], so `client.http`, `client.cache`, and the rest of
/// serenity's API are used as usual. It also pushes command payloads with
/// serenity's bulk-overwrite endpoints.
#[derive(Clone)]
pub struct DiscordClient(Context);

impl DiscordClient {
    /// Wrap a serenity context.
    pub fn new(ctx: Context) -> Self {
        Self(ctx)
    }

    /// Unwrap the serenity context.
    pub fn into_inner(self) -> Context {
        self.0
    }
}

impl From<Context> for DiscordClient {
    fn from(ctx: Context) -> Self {
        Self::new(ctx)
    }
}

impl Deref for DiscordClient {
    type Target = Context;

    fn deref(&self) -> &Context {
        &self.0
    }
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("shard_id", &self.0.shard_id)
            .finish()
    }
}

#[async_trait]
impl CommandRegistrar for DiscordClient {
    #[instrument(skip_all, fields(count = commands.len()))]
    async fn register_global(&self, commands: &[CommandPayload]) -> Result<(), HandlerError> {
        let registered = self.http.create_global_commands(&commands).await?;
        debug!(registered = registered.len(), "Global command set overwritten");
        Ok(())
    }

    #[instrument(skip_all, fields(guild_id = guild_id, count = commands.len()))]
    async fn register_guild(
        &self,
        guild_id: u64,
        commands: &[CommandPayload],
    ) -> Result<(), HandlerError> {
        let registered = self
            .http
            .create_guild_commands(GuildId::new(guild_id), &commands)
            .await?;
        debug!(registered = registered.len(), "Guild command set overwritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Discord;
    use octa_core::Platform;

    fn registrar<R: CommandRegistrar>() {}

    #[test]
    fn test_handler_client_can_register_commands() {
        registrar::<DiscordClient>();
        registrar::<<Discord as Platform>::Client>();
    }
}
