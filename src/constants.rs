// Central constants for limits and defaults.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";
// Discord allows five rows of five buttons; one row stays reserved for the
// surprise/cancel controls.
pub const MEDIA_MENU_MAX_BUTTONS: usize = 20;
pub const MAX_ITEM_NAME_LEN: usize = 64;
pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8080";
