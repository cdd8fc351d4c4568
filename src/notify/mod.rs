//! Outbound notifications

pub mod discord;

pub use discord::{DiscordNotifier, PRICE_ALERT_THRESHOLD};
