use std::env;
use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use punchclock_bot::constants::{DEFAULT_COMMAND_PREFIX, DEFAULT_HEALTH_ADDR};
use punchclock_bot::database;
use punchclock_bot::database::attendance::{
    AttendanceStore, MemoryAttendanceStore, PgAttendanceStore,
};
use punchclock_bot::database::media::{MediaStore, MemoryMediaStore, PgMediaStore};
use punchclock_bot::handler::Handler;
use punchclock_bot::health;
use punchclock_bot::model::{AppState, ShardManagerContainer};
use punchclock_bot::services::attendance::AttendanceService;
use punchclock_bot::services::library::LibraryService;

/// Picks the durable stores: Postgres when `DATABASE_URL` is set and
/// reachable, otherwise in-memory only. The bot keeps serving either way;
/// without a database, records simply don't survive a restart.
async fn build_stores() -> (Arc<dyn MediaStore>, Arc<dyn AttendanceStore>) {
    let Ok(url) = env::var("DATABASE_URL") else {
        warn!(target = "main", "DATABASE_URL not set; running with in-memory stores");
        return (
            Arc::new(MemoryMediaStore::default()),
            Arc::new(MemoryAttendanceStore::default()),
        );
    };
    match database::init::connect(&url).await {
        Ok(pool) => {
            if let Err(e) = database::init::ensure_schema(&pool).await {
                warn!(target = "main", error = %e, "schema bootstrap failed; falling back to in-memory stores");
                return (
                    Arc::new(MemoryMediaStore::default()),
                    Arc::new(MemoryAttendanceStore::default()),
                );
            }
            info!(target = "main", "connected to Postgres");
            (
                Arc::new(PgMediaStore::new(pool.clone())),
                Arc::new(PgAttendanceStore::new(pool)),
            )
        }
        Err(e) => {
            warn!(target = "main", error = %e, "database unreachable; falling back to in-memory stores");
            (
                Arc::new(MemoryMediaStore::default()),
                Arc::new(MemoryAttendanceStore::default()),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The token is the one genuinely fatal configuration item.
    let token = env::var("DISCORD_TOKEN").expect("Expected DISCORD_TOKEN in the environment.");

    let allowed_guild_id = match env::var("GUILD_ID") {
        Ok(raw) => Some(GuildId::new(
            raw.parse::<u64>().expect("GUILD_ID must be a valid number."),
        )),
        Err(_) => None,
    };

    let health_addr = env::var("HEALTH_ADDR").unwrap_or_else(|_| DEFAULT_HEALTH_ADDR.to_string());
    tokio::spawn(health::serve(health_addr));

    let (media_store, attendance_store) = build_stores().await;
    let app_state = Arc::new(AppState::new(
        LibraryService::new(media_store),
        AttendanceService::new(attendance_store),
        DEFAULT_COMMAND_PREFIX.to_string(),
    ));

    // Interactions arrive with GUILDS by default; MESSAGE_CONTENT is needed
    // for prefix commands and the ingestion loop.
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler { allowed_guild_id })
        .await
        .expect("Error creating the Discord client.");

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Could not register ctrl+c handler");
        info!(target = "main", "shutdown signal received");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!(target = "main", error = ?why, "client error");
    }
}
