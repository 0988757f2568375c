//! Slash + prefix entry points for `status` and `team`.

use super::ui;
use crate::model::AppState;
use chrono::Utc;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    EditInteractionResponse,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::model::user::User;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("status").description("Show your current attendance state.")
}

pub fn register_team() -> CreateCommand {
    CreateCommand::new("team").description("Show who is on the clock right now.")
}

fn display_name(user: &User) -> String {
    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let _ = interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let record = app_state.attendance.get(interaction.user.id.get()).await;
    let embed = ui::create_status_embed(&display_name(&interaction.user), record.as_ref(), Utc::now());
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let record = app_state.attendance.get(msg.author.id.get()).await;
    let embed = ui::create_status_embed(&display_name(&msg.author), record.as_ref(), Utc::now());
    msg.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).reference_message(msg),
        )
        .await
        .ok();
}

pub async fn run_team_slash(ctx: &Context, interaction: &CommandInteraction) {
    let _ = interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let rows = app_state.attendance.team_view().await;
    let embed = ui::create_team_embed(&rows, Utc::now());
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}

pub async fn run_team_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let rows = app_state.attendance.team_view().await;
    let embed = ui::create_team_embed(&rows, Utc::now());
    msg.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).reference_message(msg),
        )
        .await
        .ok();
}
