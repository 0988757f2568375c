//! Views or changes the runtime command prefix (admin only for changes).

use std::collections::HashMap;

use crate::AppState;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::guild::Role;
use serenity::model::id::{RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("prefix")
        .description("View or change the message-command prefix.")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "value",
                "The new prefix (omit to view the current one).",
            )
            .required(false),
        )
}

// This helper struct and function live here, self-contained with the command that uses them.
struct GuildInfo {
    owner_id: UserId,
    roles: HashMap<RoleId, Role>,
}

fn get_guild_info_from_cache(ctx: &Context, msg: &Message) -> Option<GuildInfo> {
    let guild = ctx.cache.guild(msg.guild_id?)?;

    Some(GuildInfo {
        owner_id: guild.owner_id,
        roles: guild.roles.clone(),
    })
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let new_value = interaction
        .data
        .options
        .iter()
        .find(|o| o.name == "value")
        .and_then(|o| o.value.as_str());

    // Permission gating for the set path is done by Discord itself via
    // `default_member_permissions` on the registered command.
    let content = match new_value {
        Some(value) if !value.trim().is_empty() => {
            let mut prefix = app_state.prefix.write().await;
            *prefix = value.trim().to_string();
            format!("Prefix has been updated to `{}`", prefix)
        }
        _ => {
            let prefix = app_state.prefix.read().await;
            format!("The current prefix is `{}`.", prefix)
        }
    };
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().content(content),
    );
    interaction.create_response(&ctx.http, builder).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return;
    };

    match args.first() {
        Some(&"set") => {
            let guild_info = match get_guild_info_from_cache(ctx, msg) {
                Some(info) => info,
                None => {
                    let _ = msg
                        .reply(
                            ctx,
                            "Could not get server info from cache. Please try again.",
                        )
                        .await;
                    return;
                }
            };

            let is_owner = msg.author.id == guild_info.owner_id;
            let has_admin_role = if let Some(member) = &msg.member {
                member.roles.iter().any(|role_id| {
                    guild_info
                        .roles
                        .get(role_id)
                        .is_some_and(|role| role.permissions.contains(Permissions::ADMINISTRATOR))
                })
            } else {
                false
            };

            if !is_owner && !has_admin_role {
                let _ = msg
                    .reply(ctx, "You must be an administrator to use this command.")
                    .await;
                return;
            }

            if let Some(new_prefix) = args.get(1) {
                let mut prefix_guard = app_state.prefix.write().await;
                *prefix_guard = new_prefix.to_string();
                let response = format!("Prefix has been updated to `{}`", new_prefix);
                let _ = msg.reply(ctx, response).await;
            } else {
                let _ = msg.reply(ctx, "Usage: `prefix set <new_prefix>`").await;
            }
        }
        _ => {
            let current_prefix = app_state.prefix.read().await;
            let response = format!(
                "The current prefix is `{}`. Use `prefix set <new_prefix>` to change it.",
                current_prefix
            );
            let _ = msg.reply(ctx, response).await;
        }
    }
}
