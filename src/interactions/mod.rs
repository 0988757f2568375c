//! This module acts as a central router for all component interactions.
//!
//! The main `handler.rs` file delegates to this module, which then delegates
//! to a more specialized handler based on the component's "family" prefix
//! ("att" for the attendance flows, "lib" for library ingestion). This keeps
//! the main handler clean and organizes all interaction logic in one place.

pub mod attendance_handler;
pub mod ids;
pub mod library_handler;
pub mod util;
