//! LootDashboard Library
//!
//! A Rust client that ingests a live loot event stream, maintains a bounded
//! in-memory log, derives filtered views and asynchronously enriches records
//! with market price estimates.

pub mod common;
pub mod config;
pub mod dashboard;
pub mod notify;
pub mod pricing;
pub mod store;
pub mod tracker;
pub mod view;

// Re-export commonly used types
pub use common::errors::{ClientError, Result};
pub use common::types::{
    Actor, ConnectionState, LootEvent, PriceServer, SessionStats, StatsUpdate, StreamEvent, Tier,
};
pub use config::settings::{Theme, UserSettings};
pub use config::types::AppConfig;
pub use dashboard::{DashboardRestClient, DashboardWebSocketClient};
pub use notify::{DiscordNotifier, PRICE_ALERT_THRESHOLD};
pub use pricing::{
    EnrichmentScheduler, PriceCache, PriceResolver, PriceSource, ENRICH_BATCH_DELAY,
    ENRICH_BATCH_SIZE, PRICE_TTL,
};
pub use store::{LootLog, Roster, LOG_CAPACITY};
pub use tracker::{LootTracker, HISTORY_LIMIT};
pub use view::{classify, Category, FilterSpec};
