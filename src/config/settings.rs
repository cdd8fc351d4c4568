//! Persisted user settings
//!
//! The pricing server selection, notification webhook and theme survive
//! restarts through a small JSON file next to the executable. Loading is
//! fail-soft: a missing or unreadable file yields defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::common::errors::{ClientError, Result};
use crate::common::types::PriceServer;

/// Default settings file name
pub const SETTINGS_FILE: &str = "loot_dashboard_settings.json";

/// Dashboard theme selection
///
/// Persisted only; applying a theme is a concern of the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Purple,
    Outlands,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Purple => write!(f, "purple"),
            Theme::Outlands => write!(f, "outlands"),
        }
    }
}

/// User settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserSettings {
    /// Selected pricing endpoint
    #[serde(default)]
    pub price_server: PriceServer,
    /// Discord webhook destination, empty when notifications are disabled
    #[serde(default)]
    pub discord_webhook: String,
    /// Selected theme identifier
    #[serde(default)]
    pub theme: Theme,
}

impl UserSettings {
    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Failed to parse settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Persist settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)
            .map_err(|e| ClientError::Configuration(e.to_string()))
    }
}
