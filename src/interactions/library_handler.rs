//! Handles component interactions for the library ingestion family.

use super::util::{defer_component, edit_component};
use crate::commands::library::{logic, ui};
use crate::interactions::ids;
use crate::model::AppState;
use serenity::builder::EditInteractionResponse;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn handle(ctx: &Context, component: &mut ComponentInteraction, app_state: Arc<AppState>) {
    defer_component(ctx, component).await;

    let Some(direction) = ids::parse_lib_add_id(&component.data.custom_id) else {
        return;
    };
    logic::begin(&app_state, component.user.id.get(), direction).await;
    edit_component(
        ctx,
        component,
        "lib.add",
        EditInteractionResponse::new()
            .content(ui::ingest_prompt_text(direction))
            .embeds(Vec::new())
            .components(Vec::new()),
    )
    .await;
}
