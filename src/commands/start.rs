//! The `start` command: a three-button home menu for the daily loop.

use crate::interactions::ids;
use crate::ui::buttons::Btn;
use crate::ui::style::COLOR_MENU;
use serenity::builder::{
    CreateActionRow, CreateCommand, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("start").description("Open the attendance menu.")
}

pub fn create_start_menu() -> (CreateEmbed, Vec<CreateActionRow>) {
    let embed = CreateEmbed::new()
        .title("👋 Hi! I keep the attendance sheet.")
        .description(
            "Check in when you start, check out when you leave. `/help` lists every command.",
        )
        .color(COLOR_MENU);
    let rows = vec![
        CreateActionRow::Buttons(vec![
            Btn::success(ids::ATT_MENU_CHECKIN, "✅ Check in"),
            Btn::secondary(ids::ATT_MENU_CHECKOUT, "🚪 Check out"),
        ]),
        CreateActionRow::Buttons(vec![Btn::primary(ids::ATT_MENU_STATUS, "📊 My status")]),
    ];
    (embed, rows)
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let (embed, components) = create_start_menu();
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .components(components),
    );
    interaction.create_response(&ctx.http, builder).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let (embed, components) = create_start_menu();
    msg.channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await
        .ok();
}
