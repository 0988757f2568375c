//! The check-in / check-out command family: media pick, workload confirm,
//! attendance transition, reaction dispatch.

pub mod logic;
pub mod run;
pub mod ui;
