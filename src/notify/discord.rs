//! Discord webhook notifications for notable loot

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::common::errors::{ClientError, Result};
use crate::common::types::LootEvent;
use crate::view::tier;

/// Resolved price above which a record is considered notable
pub const PRICE_ALERT_THRESHOLD: u64 = 100_000;

/// Expected webhook URL prefixes; checked before test deliveries
const WEBHOOK_PREFIXES: &[&str] = &[
    "https://discord.com/api/webhooks/",
    "https://discordapp.com/api/webhooks/",
];

/// Embed color when the tier cannot be mapped
const DEFAULT_EMBED_COLOR: u32 = 0x00A8_55F7;

/// A single webhook embed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Webhook request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// Fire-and-forget notification dispatcher
///
/// Evaluates records once their price is known and posts an embed for rare
/// or high-value loot. Delivery failures are logged and never retried; a
/// pricing or Discord outage must not disturb ingestion.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: RwLock<Option<String>>,
}

impl DiscordNotifier {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            webhook_url: RwLock::new(None),
        })
    }

    /// Check that a destination is a well-formed http(s) URL
    ///
    /// Surfaced synchronously, before anything touches the network.
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|e| ClientError::InvalidWebhook(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::InvalidWebhook(format!(
                "unsupported scheme: {other}"
            ))),
        }
    }

    /// Whether a URL looks like a Discord webhook destination
    ///
    /// A client-side sanity check for the test path, not a security boundary.
    pub fn is_discord_webhook(url: &str) -> bool {
        WEBHOOK_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
    }

    /// Configure the destination; an empty URL disables notifications
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let mut webhook = self.webhook_url.write().await;
        if url.is_empty() {
            *webhook = None;
            return Ok(());
        }

        Self::validate_url(url)?;
        *webhook = Some(url.to_string());
        Ok(())
    }

    pub async fn is_configured(&self) -> bool {
        self.webhook_url.read().await.is_some()
    }

    /// Whether a record qualifies for a notification
    pub fn should_notify(event: &LootEvent) -> bool {
        event.tier.is_rare || event.estimated_price.unwrap_or(0) > PRICE_ALERT_THRESHOLD
    }

    /// Post a notification if a destination is configured and the record is
    /// rare or valuable; failures are swallowed
    pub async fn maybe_notify(&self, event: &LootEvent) {
        let url = match self.webhook_url.read().await.clone() {
            Some(url) => url,
            None => return,
        };

        if !Self::should_notify(event) {
            return;
        }

        let payload = WebhookPayload {
            embeds: vec![Self::build_embed(event)],
        };

        if let Err(e) = self.post(&url, &payload).await {
            warn!("Discord delivery failed for {}: {}", event.item_id, e);
        } else {
            debug!("Notified Discord about {}", event.item_id);
        }
    }

    /// Send a fixed test embed to the configured destination
    ///
    /// Requires the destination to match the Discord webhook prefix; the
    /// check runs before any network call. Unlike [`maybe_notify`] the
    /// delivery outcome is reported to the caller.
    ///
    /// [`maybe_notify`]: Self::maybe_notify
    pub async fn send_test(&self) -> Result<()> {
        let url = self
            .webhook_url
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::InvalidWebhook("no webhook configured".to_string()))?;

        if !Self::is_discord_webhook(&url) {
            return Err(ClientError::InvalidWebhook(
                "not a Discord webhook URL".to_string(),
            ));
        }

        let payload = WebhookPayload {
            embeds: vec![Embed {
                title: "Loot Dashboard - Test".to_string(),
                description: "Webhook configured successfully!".to_string(),
                color: DEFAULT_EMBED_COLOR,
                thumbnail: None,
                fields: Vec::new(),
                footer: EmbedFooter {
                    text: "Loot Dashboard".to_string(),
                },
                timestamp: chrono::Utc::now().to_rfc3339(),
            }],
        };

        self.post(&url, &payload).await
    }

    /// Build the outbound embed for a record, deterministically from its
    /// fields
    pub fn build_embed(event: &LootEvent) -> Embed {
        let tier_label = if event.tier.display.is_empty() {
            "N/A".to_string()
        } else {
            event.tier.display.clone()
        };

        Embed {
            title: event.item_name.clone(),
            description: format!(
                "**Quantity:** {}\n**Tier:** {}",
                event.quantity, tier_label
            ),
            color: Self::embed_color(&event.tier.display),
            thumbnail: Some(EmbedThumbnail {
                url: Self::item_render_url(&event.item_id, 128),
            }),
            fields: vec![
                EmbedField {
                    name: "Looted by".to_string(),
                    value: event.looted_by.name.clone(),
                    inline: true,
                },
                EmbedField {
                    name: "Origin".to_string(),
                    value: event.looted_from.display_name(),
                    inline: true,
                },
            ],
            footer: EmbedFooter {
                text: "Loot Dashboard".to_string(),
            },
            timestamp: event.timestamp.to_rfc3339(),
        }
    }

    /// Embed color keyed by the parsed tier; unparseable labels fall back
    /// to the tier 4 color
    fn embed_color(tier_display: &str) -> u32 {
        let tier = tier::parse_label(tier_display).map(|info| info.tier).unwrap_or(4);
        match tier {
            4 => 0x0060_A5FA,
            5 => 0x00EF_4444,
            6 => 0x00F9_7316,
            7 => 0x00EA_B308,
            8 => 0x00FF_FFFF,
            _ => DEFAULT_EMBED_COLOR,
        }
    }

    fn item_render_url(item_id: &str, size: u32) -> String {
        format!(
            "https://render.albiononline.com/v1/item/{}.png?size={}&quality=1",
            item_id, size
        )
    }

    async fn post(&self, url: &str, payload: &WebhookPayload) -> Result<()> {
        let response = self.client.post(url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "Webhook returned status: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Actor, Tier};
    use chrono::{TimeZone, Utc};

    fn sample_event(is_rare: bool, price: Option<u64>) -> LootEvent {
        LootEvent {
            id: "a".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            item_id: "T5_MAIN_SWORD".to_string(),
            item_name: "Claymore".to_string(),
            quantity: 2,
            tier: Tier {
                display: "T5.0".to_string(),
                color: "#EF4444".to_string(),
                is_rare,
            },
            looted_by: Actor::new("Kazz"),
            looted_from: Actor::new("MOB_FOREST_KEEPER"),
            estimated_price: price,
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(DiscordNotifier::validate_url("https://discord.com/api/webhooks/1/abc").is_ok());
        assert!(DiscordNotifier::validate_url("http://127.0.0.1:9999/hook").is_ok());
        assert!(DiscordNotifier::validate_url("not a url").is_err());
        assert!(DiscordNotifier::validate_url("ftp://discord.com/x").is_err());
    }

    #[test]
    fn test_discord_prefix_check() {
        assert!(DiscordNotifier::is_discord_webhook(
            "https://discord.com/api/webhooks/1/abc"
        ));
        assert!(DiscordNotifier::is_discord_webhook(
            "https://discordapp.com/api/webhooks/1/abc"
        ));
        assert!(!DiscordNotifier::is_discord_webhook("https://example.com/hook"));
    }

    #[test]
    fn test_should_notify() {
        assert!(DiscordNotifier::should_notify(&sample_event(true, None)));
        assert!(DiscordNotifier::should_notify(&sample_event(
            false,
            Some(100_001)
        )));
        assert!(!DiscordNotifier::should_notify(&sample_event(
            false,
            Some(100_000)
        )));
        assert!(!DiscordNotifier::should_notify(&sample_event(false, None)));
    }

    #[test]
    fn test_embed_is_deterministic() {
        let event = sample_event(true, Some(250_000));
        let first = DiscordNotifier::build_embed(&event);
        let second = DiscordNotifier::build_embed(&event);
        assert_eq!(first, second);

        assert_eq!(first.title, "Claymore");
        assert_eq!(first.description, "**Quantity:** 2\n**Tier:** T5.0");
        assert_eq!(first.color, 0x00EF_4444);
        assert_eq!(first.fields[0].value, "Kazz");
        assert_eq!(first.fields[1].value, "FOREST KEEPER");
        assert!(first
            .thumbnail
            .as_ref()
            .unwrap()
            .url
            .contains("T5_MAIN_SWORD"));
    }

    #[test]
    fn test_embed_color_fallback() {
        assert_eq!(DiscordNotifier::embed_color("T8.0"), 0x00FF_FFFF);
        // Unparseable labels take the tier 4 color
        assert_eq!(DiscordNotifier::embed_color(""), 0x0060_A5FA);
        assert_eq!(DiscordNotifier::embed_color("T3.0"), DEFAULT_EMBED_COLOR);
    }

    #[tokio::test]
    async fn test_unconfigured_notifier_is_noop() {
        let notifier = DiscordNotifier::new().unwrap();
        assert!(!notifier.is_configured().await);
        // Must not attempt any delivery
        notifier.maybe_notify(&sample_event(true, Some(250_000))).await;
        assert!(notifier.send_test().await.is_err());
    }

    #[tokio::test]
    async fn test_set_webhook_rejects_invalid_urls() {
        let notifier = DiscordNotifier::new().unwrap();
        assert!(notifier.set_webhook("not a url").await.is_err());
        assert!(!notifier.is_configured().await);

        notifier
            .set_webhook("https://discord.com/api/webhooks/1/abc")
            .await
            .unwrap();
        assert!(notifier.is_configured().await);

        notifier.set_webhook("").await.unwrap();
        assert!(!notifier.is_configured().await);
    }
}
