//! Direct-message helpers.

use octa_error::{GatewayError, GatewayErrorKind};
use serenity::all::{Http, Member, PrivateChannel};
use tracing::{instrument, warn};

/// Open (or fetch) the DM channel with a guild member.
///
/// # Errors
/// Returns [`GatewayErrorKind::Http`] when Discord refuses the request,
/// for example when the member does not share a guild with the bot.
#[instrument(skip_all, fields(user_id = %member.user.id))]
pub async fn open_dm(http: &Http, member: &Member) -> Result<PrivateChannel, GatewayError> {
    member.user.create_dm_channel(http).await.map_err(|e| {
        warn!(error = %e, "Could not open DM channel");
        GatewayError::new(GatewayErrorKind::Http(e.to_string()))
    })
}
