//! Common test utilities and fixtures

use chrono::{TimeZone, Utc};
use loot_dashboard::common::types::{Actor, LootEvent, Tier};

/// Create a sample loot event for testing
pub fn sample_loot(id: &str, item_id: &str, looted_by: &str) -> LootEvent {
    LootEvent {
        id: id.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
        item_id: item_id.to_string(),
        item_name: item_id.to_string(),
        quantity: 1,
        tier: Tier::default(),
        looted_by: Actor::new(looted_by),
        looted_from: Actor::new("MOB_KEEPER"),
        estimated_price: None,
    }
}

/// Sample wire payloads for testing parsing and hydration
pub mod wire {
    /// Market data API response with mixed minimum sell prices
    pub const PRICES_MIXED: &str = r#"[
        {"item_id": "T4_BAG", "city": "Caerleon", "sell_price_min": 1200},
        {"item_id": "T4_BAG", "city": "Bridgewatch", "sell_price_min": 0},
        {"item_id": "T4_BAG", "city": "Martlock", "sell_price_min": 900}
    ]"#;

    /// Recent loots REST response, newest first
    pub const RECENT_LOOTS: &str = r##"{
        "loots": [
            {
                "id": "3",
                "timestamp": "2026-08-06T12:02:00Z",
                "item_id": "T4_BAG",
                "item_name": "Adept's Bag",
                "quantity": 1,
                "looted_by": {"name": "Brann"},
                "looted_from": {"name": "MOB_KEEPER"},
                "tier": {"display": "T4.0", "color": "#3B82F6", "is_rare": false}
            },
            {
                "id": "2",
                "timestamp": "2026-08-06T12:01:00Z",
                "item_id": "T4_ORE",
                "item_name": "Ore",
                "quantity": 2,
                "looted_by": {"name": "@MINE"},
                "looted_from": {"name": "@MINE"},
                "tier": {"display": "T4.0", "color": "#3B82F6", "is_rare": false}
            },
            {
                "id": "1",
                "timestamp": "2026-08-06T12:00:00Z",
                "item_id": "T4_ORE",
                "item_name": "Ore",
                "quantity": 1,
                "looted_by": {"name": "Kazz"},
                "looted_from": {"name": "MOB_KEEPER"},
                "tier": {"display": "T4.0", "color": "#3B82F6", "is_rare": false}
            }
        ]
    }"##;

    /// Stats REST response including a session start instant
    pub const STATS: &str = r#"{
        "total_loots": 3,
        "total_items": 4,
        "players_active": 2,
        "status": "online",
        "session_start": "2026-08-06T11:59:00Z"
    }"#;
}
