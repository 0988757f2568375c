// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod commands;
pub mod constants;
pub mod database;
pub mod error;
pub mod handler;
pub mod health;
pub mod interactions;
pub mod model;
pub mod services;
pub mod session;
pub mod ui;
pub mod util;

// Convenient re-exports for frequently used types.
pub use error::{EngineError, StoreError};
pub use model::AppState;
