//! Central UI style constants.
pub const COLOR_MENU: u32 = 0x3498DB; // Blue
pub const COLOR_CHECKIN: u32 = 0x2ECC71; // Green
pub const COLOR_CHECKOUT: u32 = 0xCD7F32; // Bronze
pub const COLOR_LIBRARY: u32 = 0x9B59B6; // Purple
