//! Service layer between the handlers and the durable stores.

pub mod attendance;
pub mod library;
