//! Latency check against the gateway heartbeat.

use crate::model::ShardManagerContainer;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("ping").description("Checks the bot's latency.")
}

async fn heartbeat_latency(ctx: &Context) -> String {
    let data = ctx.data.read().await;
    let Some(shard_manager) = data.get::<ShardManagerContainer>() else {
        return "N/A".to_string();
    };
    let runners = shard_manager.runners.lock().await;
    runners
        .get(&ctx.shard_id)
        .and_then(|runner| runner.latency)
        .map_or_else(
            || "N/A".to_string(),
            |latency| format!("{} ms", latency.as_millis()),
        )
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let latency = heartbeat_latency(ctx).await;
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(format!("🏓 Pong! Heartbeat latency: `{}`", latency)),
    );
    interaction.create_response(&ctx.http, builder).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let latency = heartbeat_latency(ctx).await;
    let response = format!("🏓 Pong! Heartbeat latency: `{}`", latency);
    if let Err(why) = msg.channel_id.say(&ctx.http, response).await {
        tracing::warn!(target = "commands.ping", error = ?why, "failed to send ping response");
    }
}
