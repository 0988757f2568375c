//! The `status` / `team` command family: read-only attendance views.

pub mod run;
pub mod ui;
