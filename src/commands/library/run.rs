//! Slash + prefix entry points for the library commands
//! (`library`, `addmedia`, `removemedia`, `done`, `skip`, `cancel`).

use super::{logic, ui};
use crate::database::models::Direction;
use crate::model::AppState;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register_library() -> CreateCommand {
    CreateCommand::new("library").description("List everything in the reaction library.")
}

pub fn register_addmedia() -> CreateCommand {
    CreateCommand::new("addmedia")
        .description("Add reactions to the shared library.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "list", "Which list to fill.")
                .required(false)
                .add_string_choice("Check-in", "checkin")
                .add_string_choice("Check-out", "checkout"),
        )
}

pub fn register_removemedia() -> CreateCommand {
    CreateCommand::new("removemedia")
        .description("Remove one reaction from the library by its position.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "list", "Which list to edit.")
                .required(true)
                .add_string_choice("Check-in", "checkin")
                .add_string_choice("Check-out", "checkout"),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "position",
                "Position as shown by /library (starting at 1).",
            )
            .required(true)
            .min_int_value(1),
        )
}

pub fn register_done() -> CreateCommand {
    CreateCommand::new("done").description("Finish adding media to the library.")
}

pub fn register_skip() -> CreateCommand {
    CreateCommand::new("skip").description("Store the pending item without a name.")
}

pub fn register_cancel() -> CreateCommand {
    CreateCommand::new("cancel").description("Abort the current flow.")
}

fn direction_option(interaction: &CommandInteraction) -> Option<Direction> {
    interaction
        .data
        .options
        .iter()
        .find(|o| o.name == "list")
        .and_then(|o| o.value.as_str())
        .and_then(|s| s.parse().ok())
}

fn position_option(interaction: &CommandInteraction) -> Option<i64> {
    interaction
        .data
        .options
        .iter()
        .find(|o| o.name == "position")
        .and_then(|o| o.value.as_i64())
}

async fn defer(ctx: &Context, interaction: &CommandInteraction) {
    let _ = interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await;
}

pub async fn run_library_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let embed = ui::create_library_embed(&app_state.library.snapshot().await);
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}

pub async fn run_library_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let embed = ui::create_library_embed(&app_state.library.snapshot().await);
    msg.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).reference_message(msg),
        )
        .await
        .ok();
}

pub async fn run_addmedia_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let builder = match direction_option(interaction) {
        Some(direction) => {
            logic::begin(&app_state, interaction.user.id.get(), direction).await;
            EditInteractionResponse::new().content(ui::ingest_prompt_text(direction))
        }
        None => {
            let (embed, components) = ui::create_target_menu();
            EditInteractionResponse::new().embed(embed).components(components)
        }
    };
    interaction.edit_response(&ctx.http, builder).await.ok();
}

pub async fn run_addmedia_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let builder = match args.first().and_then(|s| s.parse::<Direction>().ok()) {
        Some(direction) => {
            logic::begin(&app_state, msg.author.id.get(), direction).await;
            CreateMessage::new()
                .content(ui::ingest_prompt_text(direction))
                .reference_message(msg)
        }
        None => {
            let (embed, components) = ui::create_target_menu();
            CreateMessage::new()
                .embed(embed)
                .components(components)
                .reference_message(msg)
        }
    };
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}

pub async fn run_removemedia_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let Some(direction) = direction_option(interaction) else {
        interaction
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new().content("Pick a list: `checkin` or `checkout`."),
            )
            .await
            .ok();
        return;
    };
    let position = position_option(interaction).unwrap_or(0);
    let content = remove_by_position(&app_state, direction, position).await;
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
        .ok();
}

pub async fn run_removemedia_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let direction = args.first().and_then(|s| s.parse::<Direction>().ok());
    let position = args.get(1).and_then(|s| s.parse::<i64>().ok());
    let content = match (direction, position) {
        (Some(direction), Some(position)) => {
            remove_by_position(&app_state, direction, position).await
        }
        _ => "Usage: `removemedia <checkin|checkout> <position>`".to_string(),
    };
    msg.reply(&ctx.http, content).await.ok();
}

async fn remove_by_position(app_state: &AppState, direction: Direction, position: i64) -> String {
    if position < 1 {
        return "Position starts at 1; see `/library` for the numbering.".to_string();
    }
    let index = (position - 1) as usize;
    match app_state.library.remove_at(direction, index).await {
        Ok(item) => ui::removed_text(direction, position as usize, &item),
        Err(e) => ui::remove_error_text(&e),
    }
}

pub async fn run_done_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::finish(&app_state, interaction.user.id.get()).await;
    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(ui::ingest_reply_text(&reply)),
        )
        .await
        .ok();
}

pub async fn run_done_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::finish(&app_state, msg.author.id.get()).await;
    msg.reply(&ctx.http, ui::ingest_reply_text(&reply)).await.ok();
}

pub async fn run_skip_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::skip_name(&app_state, interaction.user.id.get()).await;
    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(ui::ingest_reply_text(&reply)),
        )
        .await
        .ok();
}

pub async fn run_skip_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::skip_name(&app_state, msg.author.id.get()).await;
    msg.reply(&ctx.http, ui::ingest_reply_text(&reply)).await.ok();
}

pub async fn run_cancel_slash(ctx: &Context, interaction: &CommandInteraction) {
    defer(ctx, interaction).await;
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::cancel(&app_state, interaction.user.id.get()).await;
    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(ui::ingest_reply_text(&reply)),
        )
        .await
        .ok();
}

pub async fn run_cancel_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let reply = logic::cancel(&app_state, msg.author.id.get()).await;
    msg.reply(&ctx.http, ui::ingest_reply_text(&reply)).await.ok();
}
