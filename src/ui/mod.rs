//! Shared presentation helpers: button builders and style constants.
pub mod buttons;
pub mod style;
