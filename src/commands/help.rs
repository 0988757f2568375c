//! This module implements the categorized help command.
//!
//! Features:
//! - A categorized overview for browsing.
//! - A detailed view for specific commands via `help <command>`.
//! - A footer showing the live prefix, which admins can change at runtime.

use crate::AppState;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CommandCategory {
    General,
    Attendance,
    Library,
    Admin,
}

impl CommandCategory {
    fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Attendance => "Attendance",
            Self::Library => "Reaction Library",
            Self::Admin => "Admin",
        }
    }
    fn emoji(&self) -> &'static str {
        match self {
            Self::General => "🔧",
            Self::Attendance => "🕒",
            Self::Library => "🗂️",
            Self::Admin => "🛡️",
        }
    }
}

struct CommandInfo {
    name: &'static str,
    description: &'static str,
    usage: &'static [&'static str],
    details: &'static str,
    category: CommandCategory,
}

const COMMANDS: &[CommandInfo] = &[
    // General Commands
    CommandInfo {
        name: "start",
        description: "Opens the attendance menu.",
        usage: &["start"],
        details: "Posts the home menu with check-in, check-out and status buttons.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "help",
        description: "Shows this help menu.",
        usage: &["help", "h", "help <command>"],
        details: "Displays a list of all available commands or detailed information about a specific command.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "ping",
        description: "Checks the bot's latency.",
        usage: &["ping"],
        details: "Pings the Discord gateway to check the bot's heartbeat latency.",
        category: CommandCategory::General,
    },
    // Attendance Commands
    CommandInfo {
        name: "checkin",
        description: "Start the day.",
        usage: &["checkin", "in"],
        details: "Opens the check-in flow: pick a reaction from the library, tag your workload (or skip), and the bot marks you on the clock.",
        category: CommandCategory::Attendance,
    },
    CommandInfo {
        name: "checkout",
        description: "End the day.",
        usage: &["checkout", "out"],
        details: "Opens the check-out flow: pick a reaction, confirm, and the bot marks you off the clock and reports your shift length.",
        category: CommandCategory::Attendance,
    },
    CommandInfo {
        name: "status",
        description: "Shows your current attendance state.",
        usage: &["status", "st"],
        details: "Whether you are on the clock, since when, elapsed time, and your workload tag.",
        category: CommandCategory::Attendance,
    },
    CommandInfo {
        name: "team",
        description: "Shows who is on the clock right now.",
        usage: &["team"],
        details: "Lists everyone the bot knows about, split into on-the-clock and off-the-clock sections.",
        category: CommandCategory::Attendance,
    },
    // Library Commands
    CommandInfo {
        name: "library",
        description: "Lists the shared reaction library.",
        usage: &["library", "lib"],
        details: "Shows both reaction lists with the positions `removemedia` expects.",
        category: CommandCategory::Library,
    },
    CommandInfo {
        name: "addmedia",
        description: "Add reactions to the library.",
        usage: &["addmedia", "addmedia <checkin|checkout>", "add"],
        details: "Starts the ingestion loop: every message you send becomes an item (text, links, attachments). Non-text items get asked for a name. `done` finishes, `skip` skips a name, `cancel` aborts.",
        category: CommandCategory::Library,
    },
    CommandInfo {
        name: "removemedia",
        description: "Remove one reaction by position.",
        usage: &["removemedia <checkin|checkout> <position>", "rm <list> <position>"],
        details: "Deletes the item at the given 1-based position. Later items shift up, so grab fresh positions from `library` first.",
        category: CommandCategory::Library,
    },
    CommandInfo {
        name: "done",
        description: "Finish adding media.",
        usage: &["done"],
        details: "Closes the ingestion loop. An item still waiting on a name is discarded.",
        category: CommandCategory::Library,
    },
    CommandInfo {
        name: "skip",
        description: "Store the pending item without a name.",
        usage: &["skip"],
        details: "Only meaningful while the bot is asking you to name an item.",
        category: CommandCategory::Library,
    },
    CommandInfo {
        name: "cancel",
        description: "Abort the current flow.",
        usage: &["cancel"],
        details: "Ends whatever flow you are in (check-in/out menus or the ingestion loop). Safe to repeat; never touches stored data.",
        category: CommandCategory::Library,
    },
    // Admin Commands
    CommandInfo {
        name: "prefix",
        description: "Views or (admin only) sets the prefix.",
        usage: &["prefix", "prefix set <new_prefix>"],
        details: "Displays the current command prefix. Administrators can use the `set` subcommand to change it.",
        category: CommandCategory::Admin,
    },
];

/// Public helper returning all registered primary help command names.
/// Exposed for integration tests to ensure help coverage. Marked allow(dead_code)
/// because it's only referenced externally by tests.
#[allow(dead_code)]
pub fn all_command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|c| c.name).collect()
}

pub fn register() -> CreateCommand {
    CreateCommand::new("help")
        .description("Shows information about commands")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "command",
                "The specific command you want help with (free text)",
            )
            .required(false),
        )
}

async fn create_help_embed(ctx: &Context, command_name_opt: Option<&str>) -> CreateEmbed {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        return CreateEmbed::new()
            .title("Help (limited)")
            .description("Internal state unavailable.");
    };
    let prefix = app_state.prefix.read().await.clone();
    let footer_text = format!("Current Prefix: {}", prefix);
    let mut embed = CreateEmbed::new()
        .footer(CreateEmbedFooter::new(footer_text))
        .color(0x5865F2);

    match command_name_opt {
        Some(name) => {
            if let Some(cmd) = COMMANDS.iter().find(|c| c.name == name) {
                let usage_string = cmd
                    .usage
                    .iter()
                    .map(|u| format!("`{}{}`", prefix, u))
                    .collect::<Vec<_>>()
                    .join("\n");
                embed = embed
                    .title(format!("{} Command: {}", cmd.category.emoji(), cmd.name))
                    .field("Description", cmd.description, false)
                    .field("Usage", usage_string, false)
                    .field("Details", cmd.details, false);
            } else {
                embed = embed
                    .title("Command Not Found")
                    .description(format!("Sorry, I don't know a command called `{}`.", name))
                    .color(0xFF0000);
            }
        }
        None => {
            embed = embed.title("Help Menu").description(format!(
                "Here are my available commands. Every one also works as a slash command. For more details, use `{}help <command>`.",
                prefix
            ));
            let categories = [
                CommandCategory::General,
                CommandCategory::Attendance,
                CommandCategory::Library,
                CommandCategory::Admin,
            ];
            for category in categories {
                let command_list = get_commands_in_category(category);
                if !command_list.is_empty() {
                    embed = embed.field(
                        format!("{} {}", category.emoji(), category.name()),
                        command_list,
                        false,
                    );
                }
            }
            embed = embed.field(
                "The daily loop",
                "`checkin` when you arrive, `checkout` when you leave, `team` to see who's around.",
                false,
            );
        }
    }
    embed
}

fn get_commands_in_category(category: CommandCategory) -> String {
    COMMANDS
        .iter()
        .filter(|c| c.category == category)
        .map(|c| format!("`{}`", c.name))
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let command_name = interaction
        .data
        .options
        .first()
        .and_then(|opt| opt.value.as_str());
    let embed = create_help_embed(ctx, command_name).await;
    let builder = CreateInteractionResponseMessage::new().embed(embed);
    let response = serenity::builder::CreateInteractionResponse::Message(builder);
    interaction.create_response(&ctx.http, response).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) {
    let command_name = args.first().map(|s| s.as_ref());
    let embed = create_help_embed(ctx, command_name).await;
    let builder = CreateMessage::new().embed(embed).reference_message(msg);
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}
