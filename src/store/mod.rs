//! In-memory storage for the live session

pub mod log;
pub mod roster;

pub use log::{LootLog, LOG_CAPACITY};
pub use roster::Roster;
