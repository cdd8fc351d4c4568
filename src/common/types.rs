//! Unified types shared across the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pricing endpoint selection
///
/// Each variant maps to one of the interchangeable regional market data
/// services. Prices from different servers are not comparable, so switching
/// the selection invalidates the price cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceServer {
    #[default]
    West,
    Europe,
    East,
}

impl PriceServer {
    /// Host of the market data service for this server
    pub fn host(&self) -> &'static str {
        match self {
            PriceServer::West => "west.albion-online-data.com",
            PriceServer::Europe => "europe.albion-online-data.com",
            PriceServer::East => "east.albion-online-data.com",
        }
    }
}

impl std::fmt::Display for PriceServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceServer::West => write!(f, "west"),
            PriceServer::Europe => write!(f, "europe"),
            PriceServer::East => write!(f, "east"),
        }
    }
}

/// A named actor on a loot record: either the looter or the source entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub guild: String,
    #[serde(default)]
    pub alliance: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guild: String::new(),
            alliance: String::new(),
        }
    }

    /// Environment-sourced actors carry an `@` prefix and are excluded from
    /// the player roster
    pub fn is_environment(&self) -> bool {
        self.name.starts_with('@')
    }

    /// Human-readable name with sentinel prefixes stripped
    ///
    /// `@CHEST` becomes `CHEST`, `MOB_FOREST_KEEPER` becomes `FOREST KEEPER`.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            return "-".to_string();
        }
        if let Some(rest) = self.name.strip_prefix('@') {
            return rest.to_string();
        }
        if let Some(rest) = self.name.strip_prefix("MOB_") {
            return rest.replace('_', " ");
        }
        self.name.clone()
    }
}

/// Tier descriptor attached to a loot record
///
/// `display` is a human-readable label like `T4.2`; an empty label means the
/// tier is unknown. `is_rare` flags notable items independently of the
/// numeric tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tier {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_rare: bool,
}

/// One observed item pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEvent {
    /// Opaque unique identifier assigned upstream; the sole reconciliation
    /// key for asynchronous price patches
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub tier: Tier,
    pub looted_by: Actor,
    pub looted_from: Actor,
    /// Average sell price in silver, set exactly once by the enrichment
    /// pipeline; absent until a resolution completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<u64>,
}

impl LootEvent {
    /// Resolved price times quantity, if the price is known and positive
    pub fn estimated_total(&self) -> Option<u64> {
        match self.estimated_price {
            Some(price) if price > 0 => Some(price * self.quantity as u64),
            _ => None,
        }
    }
}

/// Coarse connection status reported by the upstream capture process
///
/// Separate from the raw websocket connection boolean: the stream can be
/// connected while the capture itself is still offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Offline,
    Connecting,
    Online,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Offline => write!(f, "offline"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Online => write!(f, "online"),
        }
    }
}

/// Server-reported aggregate statistics for the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionStats {
    pub total_loots: u64,
    pub total_items: u64,
    pub players_active: u64,
    pub status: ConnectionState,
    #[serde(default)]
    pub session_start: Option<DateTime<Utc>>,
}

impl SessionStats {
    /// Shallow merge of a partial stats payload; absent fields keep their
    /// current value
    pub fn merge(&mut self, update: StatsUpdate) {
        if let Some(total_loots) = update.total_loots {
            self.total_loots = total_loots;
        }
        if let Some(total_items) = update.total_items {
            self.total_items = total_items;
        }
        if let Some(players_active) = update.players_active {
            self.players_active = players_active;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(session_start) = update.session_start {
            self.session_start = Some(session_start);
        }
    }

    /// Zero the counters; the coarse status is left untouched
    pub fn reset_counters(&mut self) {
        self.total_loots = 0;
        self.total_items = 0;
        self.players_active = 0;
    }

    /// Elapsed session time, if the server reported a start instant
    pub fn session_duration(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.session_start.map(|start| now - start)
    }
}

/// Partial stats payload merged shallowly into [`SessionStats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatsUpdate {
    #[serde(default)]
    pub total_loots: Option<u64>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub players_active: Option<u64>,
    #[serde(default)]
    pub status: Option<ConnectionState>,
    #[serde(default)]
    pub session_start: Option<DateTime<Utc>>,
}

/// Unified event emitted by the stream connection
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// The persistent connection was established
    Connected,
    /// The persistent connection dropped
    Disconnected { reason: Option<String> },
    /// One new loot record arrived
    NewLoot(LootEvent),
    /// Partial aggregate stats update
    Stats(StatsUpdate),
    /// Coarse capture status changed
    Status(ConnectionState),
    /// Bulk history payload, source-ordered oldest to newest
    History(Vec<LootEvent>),
    /// Reset signal: log, roster and counters start over
    Clear,
    /// Unrecognized message, kept for debugging
    Raw(String),
}
