//! This module defines the shared data structures used throughout the application.
//! These structs are used as `TypeMapKey`s to store shared state in Serenity's global context.

use crate::services::attendance::AttendanceService;
use crate::services::library::LibraryService;
use crate::session::SessionMap;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A container for the ShardManager, allowing it to be stored in the global context.
/// This provides access to shard-specific information, like gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the application.
/// An `Arc<AppState>` is stored in the global context for easy and safe access
/// from any command or event handler.
pub struct AppState {
    /// The shared reaction library: cached in memory, written through to the
    /// durable store on every mutation.
    pub library: LibraryService,
    /// Per-user attendance records with per-user transition locks.
    pub attendance: AttendanceService,
    /// Per-user dialog state for the selection and ingestion flows.
    /// Process-local on purpose: a restart quietly resets everyone to Idle.
    pub sessions: SessionMap,
    /// The current command prefix, which can be changed at runtime by administrators.
    pub prefix: Arc<RwLock<String>>,
}

impl AppState {
    pub fn new(library: LibraryService, attendance: AttendanceService, prefix: String) -> Self {
        Self {
            library,
            attendance,
            sessions: SessionMap::new(),
            prefix: Arc::new(RwLock::new(prefix)),
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
