//! Slash + prefix entry points for the `checkin` / `checkout` commands.

use super::{logic, ui};
use crate::database::models::Direction;
use crate::model::AppState;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    EditInteractionResponse,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register_checkin() -> CreateCommand {
    CreateCommand::new("checkin")
        .description("Start the day: pick a reaction and tag your workload.")
}

pub fn register_checkout() -> CreateCommand {
    CreateCommand::new("checkout").description("End the day: pick a reaction and confirm.")
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, direction: Direction) {
    let _ = interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let builder = match logic::begin_flow(&app_state, interaction.user.id.get(), direction).await {
        Ok(menu) => {
            let (embed, components) = ui::create_media_menu(menu.direction, &menu.items);
            EditInteractionResponse::new().embed(embed).components(components)
        }
        Err(e) => EditInteractionResponse::new().content(ui::engine_error_text(&e)),
    };
    interaction.edit_response(&ctx.http, builder).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message, direction: Direction) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let builder = match logic::begin_flow(&app_state, msg.author.id.get(), direction).await {
        Ok(menu) => {
            let (embed, components) = ui::create_media_menu(menu.direction, &menu.items);
            CreateMessage::new()
                .embed(embed)
                .components(components)
                .reference_message(msg)
        }
        Err(e) => CreateMessage::new()
            .content(ui::engine_error_text(&e))
            .reference_message(msg),
    };
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}
