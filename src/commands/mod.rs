// src/commands/mod.rs
// This file declares the existence of our command modules.

pub mod attendance;
pub mod help;
pub mod library;
pub mod ping;
pub mod prefix;
pub mod start;
pub mod status;
