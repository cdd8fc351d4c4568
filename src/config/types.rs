//! Configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Dashboard stream/REST endpoints
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Dashboard endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL for the dashboard REST API
    #[serde(default = "default_dashboard_rest_url")]
    pub base_url: String,
    /// WebSocket URL for the live event stream
    #[serde(default = "default_dashboard_ws_url")]
    pub websocket_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_dashboard_rest_url(),
            websocket_url: default_dashboard_ws_url(),
        }
    }
}

fn default_dashboard_rest_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_dashboard_ws_url() -> String {
    "ws://127.0.0.1:5000/stream".to_string()
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Delay between reconnection attempts in milliseconds
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
    /// Maximum reconnection attempts (0 = infinite)
    #[serde(default)]
    pub max_reconnect_attempts: u32,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reconnect_delay_ms: default_reconnect_delay(),
            max_reconnect_attempts: 0,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reconnect_delay() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}
