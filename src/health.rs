//! Uptime endpoint for external monitors.
//!
//! Serves `GET /` and `GET /health`, both answering 200 with a static body.
//! The bot's actual health is the gateway connection; this endpoint only
//! proves the process is alive.

use axum::{Router, routing::get};
use tracing::{error, info};

async fn ok() -> &'static str {
    "ok"
}

pub fn router() -> Router {
    Router::new().route("/", get(ok)).route("/health", get(ok))
}

/// Binds and serves until the process exits. A bind failure is logged, not
/// fatal: losing the monitor endpoint should never take the bot down.
pub async fn serve(addr: String) {
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(target = "health", addr = %addr, error = %e, "could not bind health endpoint");
            return;
        }
    };
    info!(target = "health", addr = %addr, "health endpoint started");
    if let Err(e) = axum::serve(listener, router()).await {
        error!(target = "health", error = %e, "health endpoint terminated unexpectedly");
    }
}
