//! Dashboard wire message types

use serde::{Deserialize, Serialize};

use crate::common::types::{ConnectionState, LootEvent};

/// Envelope for every inbound stream frame
///
/// The payload shape depends on the event name; `clear` style signals carry
/// no payload at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamMessage {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of a `status` message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: ConnectionState,
}

/// Payload of a `history` message, source-ordered oldest to newest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub loots: Vec<LootEvent>,
}

// ============================================================================
// REST API Response Types
// ============================================================================

/// Response from GET /recent-loots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentLootsResponse {
    #[serde(default)]
    pub loots: Vec<LootEvent>,
}

/// Response from POST /clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
}
