use crate::database::models::Direction;
use crate::session::classify::RawSubmission;
use crate::{AppState, commands, interactions};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::{channel::Message, gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use std::str::FromStr;
use tracing::{error, info};

enum Command {
    Start,
    CheckIn,
    CheckOut,
    Status,
    Team,
    Library,
    AddMedia,
    RemoveMedia,
    Done,
    Skip,
    Cancel,
    Help,
    Ping,
    Prefix,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Command::Start),
            "checkin" | "in" => Ok(Command::CheckIn),
            "checkout" | "out" => Ok(Command::CheckOut),
            "status" | "st" => Ok(Command::Status),
            "team" => Ok(Command::Team),
            "library" | "lib" => Ok(Command::Library),
            "addmedia" | "add" => Ok(Command::AddMedia),
            "removemedia" | "rm" => Ok(Command::RemoveMedia),
            "done" => Ok(Command::Done),
            "skip" => Ok(Command::Skip),
            "cancel" => Ok(Command::Cancel),
            "help" | "h" => Ok(Command::Help),
            "ping" => Ok(Command::Ping),
            "prefix" => Ok(Command::Prefix),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler {
    /// When set, the bot only serves this guild and registers its slash
    /// commands there (instant availability); otherwise registration is
    /// global.
    pub allowed_guild_id: Option<GuildId>,
}

fn submission_from_message(msg: &Message) -> RawSubmission {
    let attachment = msg.attachments.first();
    RawSubmission {
        text: msg.content.clone(),
        attachment_url: attachment.map(|a| a.url.clone()),
        attachment_content_type: attachment.and_then(|a| a.content_type.clone()),
    }
}

/// Non-prefixed messages only matter while their author is mid-ingestion;
/// everything else is other people talking.
async fn route_ingestion(ctx: &Context, msg: &Message, app_state: &AppState) {
    let user_id = msg.author.id.get();
    if !app_state.sessions.state(user_id).await.in_ingestion() {
        return;
    }
    let raw = submission_from_message(msg);
    let reply = commands::library::logic::receive_message(app_state, user_id, raw).await;
    let text = commands::library::ui::ingest_reply_text(&reply);
    msg.reply(&ctx.http, text).await.ok();
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, mut interaction: Interaction) {
        let app_state = {
            ctx.data
                .read()
                .await
                .get::<AppState>()
                .expect("Expected AppState in TypeMap.")
                .clone()
        };
        if let Interaction::Command(command) = &mut interaction {
            match command.data.name.as_str() {
                "start" => commands::start::run_slash(&ctx, command).await,
                "checkin" => {
                    commands::attendance::run::run_slash(&ctx, command, Direction::CheckIn).await
                }
                "checkout" => {
                    commands::attendance::run::run_slash(&ctx, command, Direction::CheckOut).await
                }
                "status" => commands::status::run::run_slash(&ctx, command).await,
                "team" => commands::status::run::run_team_slash(&ctx, command).await,
                "library" => commands::library::run::run_library_slash(&ctx, command).await,
                "addmedia" => commands::library::run::run_addmedia_slash(&ctx, command).await,
                "removemedia" => commands::library::run::run_removemedia_slash(&ctx, command).await,
                "done" => commands::library::run::run_done_slash(&ctx, command).await,
                "skip" => commands::library::run::run_skip_slash(&ctx, command).await,
                "cancel" => commands::library::run::run_cancel_slash(&ctx, command).await,
                "help" => commands::help::run_slash(&ctx, command).await,
                "ping" => commands::ping::run_slash(&ctx, command).await,
                "prefix" => commands::prefix::run_slash(&ctx, command).await,
                _ => {}
            }
        } else if let Interaction::Component(component) = &mut interaction {
            let command_family = component.data.custom_id.split('_').next().unwrap_or("");
            match command_family {
                "att" => {
                    interactions::attendance_handler::handle(&ctx, component, app_state).await
                }
                "lib" => interactions::library_handler::handle(&ctx, component, app_state).await,
                _ => {}
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        if let Some(allowed) = self.allowed_guild_id {
            if msg.guild_id != Some(allowed) {
                return;
            }
        }
        let app_state = {
            ctx.data
                .read()
                .await
                .get::<AppState>()
                .expect("Expected AppState in TypeMap.")
                .clone()
        };
        let prefix_string = app_state.prefix.read().await.clone();

        // Prefixed commands always win, so the loop can never trap a user;
        // everything else may be an ingestion submission.
        let Some(command_body) = msg.content.strip_prefix(&prefix_string) else {
            route_ingestion(&ctx, &msg, &app_state).await;
            return;
        };
        let mut args = command_body.split_whitespace();
        let Some(command_str) = args.next() else {
            return;
        };
        let command = Command::from_str(command_str).unwrap_or(Command::Unknown);
        let args_vec: Vec<&str> = args.collect();
        match command {
            Command::Start => commands::start::run_prefix(&ctx, &msg).await,
            Command::CheckIn => {
                commands::attendance::run::run_prefix(&ctx, &msg, Direction::CheckIn).await
            }
            Command::CheckOut => {
                commands::attendance::run::run_prefix(&ctx, &msg, Direction::CheckOut).await
            }
            Command::Status => commands::status::run::run_prefix(&ctx, &msg).await,
            Command::Team => commands::status::run::run_team_prefix(&ctx, &msg).await,
            Command::Library => commands::library::run::run_library_prefix(&ctx, &msg).await,
            Command::AddMedia => {
                commands::library::run::run_addmedia_prefix(&ctx, &msg, args_vec).await
            }
            Command::RemoveMedia => {
                commands::library::run::run_removemedia_prefix(&ctx, &msg, args_vec).await
            }
            Command::Done => commands::library::run::run_done_prefix(&ctx, &msg).await,
            Command::Skip => commands::library::run::run_skip_prefix(&ctx, &msg).await,
            Command::Cancel => commands::library::run::run_cancel_prefix(&ctx, &msg).await,
            Command::Help => commands::help::run_prefix(&ctx, &msg, args_vec).await,
            Command::Ping => commands::ping::run_prefix(&ctx, &msg).await,
            Command::Prefix => commands::prefix::run_prefix(&ctx, &msg, args_vec).await,
            Command::Unknown => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target = "handler", user = %ready.user.name, "connected and ready");
        let commands_to_register = vec![
            commands::start::register(),
            commands::attendance::run::register_checkin(),
            commands::attendance::run::register_checkout(),
            commands::status::run::register(),
            commands::status::run::register_team(),
            commands::library::run::register_library(),
            commands::library::run::register_addmedia(),
            commands::library::run::register_removemedia(),
            commands::library::run::register_done(),
            commands::library::run::register_skip(),
            commands::library::run::register_cancel(),
            commands::help::register(),
            commands::ping::register(),
            commands::prefix::register(),
        ];
        let result = match self.allowed_guild_id {
            Some(guild_id) => guild_id.set_commands(&ctx.http, commands_to_register).await,
            None => {
                serenity::model::application::Command::set_global_commands(
                    &ctx.http,
                    commands_to_register,
                )
                .await
            }
        };
        match result {
            Ok(registered) => {
                info!(target = "handler", count = registered.len(), "registered slash commands");
            }
            Err(e) => {
                error!(target = "handler", error = ?e, "error registering slash commands");
            }
        }
    }
}
