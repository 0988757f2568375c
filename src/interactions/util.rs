//! Shared interaction utility helpers (single defer + safe edit/followup wrappers).
use serenity::builder::{CreateInteractionResponseFollowup, EditInteractionResponse};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;

/// Acknowledge a component interaction (non-ephemeral) ignoring duplicate/late errors.
pub async fn defer_component(ctx: &Context, c: &ComponentInteraction) {
    if let Err(e) = c.defer(&ctx.http).await {
        tracing::debug!(target="ui.defer", cid=%c.data.custom_id, error=?e, "defer failed (already acknowledged?)");
    }
}

/// Edit original interaction response; logs failure with a tag for observability.
pub async fn edit_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) {
    if let Err(e) = c.edit_response(&ctx.http, builder).await {
        tracing::error!(target="ui.edit", cid=%c.data.custom_id, tag=%tag, error=?e, "edit_response failed");
    }
}

/// Send an additional message after the menu edit (reaction media, notices).
/// Returns false on failure so the caller can try a plainer fallback.
pub async fn followup_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: CreateInteractionResponseFollowup,
) -> bool {
    match c.create_followup(&ctx.http, builder).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(target="ui.followup", cid=%c.data.custom_id, tag=%tag, error=?e, "create_followup failed");
            false
        }
    }
}
