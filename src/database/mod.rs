//! This module acts as a central hub for all durable-storage logic.
//! It declares the store contracts and their Postgres and in-memory
//! implementations so they can be accessed from elsewhere in the
//! application via their full path, e.g., `database::media::MediaStore`.

pub mod attendance;
pub mod init;
pub mod media;
pub mod models;
