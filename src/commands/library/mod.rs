//! The media-library command family: listing, removal, and the multi-step
//! ingestion loop (add items, name them, loop until done).

pub mod logic;
pub mod run;
pub mod ui;
