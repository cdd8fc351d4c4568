//! Integration tests for the dashboard REST client and hydration
//!
//! The dashboard server is stubbed with wiremock; no real network calls.

mod common;

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use loot_dashboard::common::types::ConnectionState;
use loot_dashboard::dashboard::DashboardRestClient;
use loot_dashboard::notify::DiscordNotifier;
use loot_dashboard::pricing::PriceSource;
use loot_dashboard::tracker::LootTracker;

struct ZeroSource;

#[async_trait]
impl PriceSource for ZeroSource {
    async fn resolve(&self, _item_id: &str) -> u64 {
        0
    }
}

#[tokio::test]
async fn test_get_recent_loots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recent-loots"))
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(common::wire::RECENT_LOOTS, "application/json"),
        )
        .mount(&server)
        .await;

    let client = DashboardRestClient::new(&server.uri()).unwrap();
    let loots = client.get_recent_loots(100).await.unwrap();

    assert_eq!(loots.len(), 3);
    assert_eq!(loots[0].id, "3");
    assert_eq!(loots[0].item_id, "T4_BAG");
    assert!(loots.iter().all(|l| l.estimated_price.is_none()));
}

#[tokio::test]
async fn test_get_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(common::wire::STATS, "application/json"),
        )
        .mount(&server)
        .await;

    let client = DashboardRestClient::new(&server.uri()).unwrap();
    let stats = client.get_stats().await.unwrap();

    assert_eq!(stats.total_loots, Some(3));
    assert_eq!(stats.players_active, Some(2));
    assert_eq!(stats.status, Some(ConnectionState::Online));
    assert_eq!(
        stats.session_start,
        Some(Utc.with_ymd_and_hms(2026, 8, 6, 11, 59, 0).unwrap())
    );
}

#[tokio::test]
async fn test_clear() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = DashboardRestClient::new(&server.uri()).unwrap();
    assert!(client.clear().await.unwrap());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recent-loots"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = DashboardRestClient::new(&server.uri()).unwrap();
    assert!(client.get_recent_loots(100).await.is_err());
}

#[tokio::test]
async fn test_hydration_installs_history_and_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recent-loots"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(common::wire::RECENT_LOOTS, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(common::wire::STATS, "application/json"),
        )
        .mount(&server)
        .await;

    let rest = DashboardRestClient::new(&server.uri()).unwrap();
    let notifier = Arc::new(DiscordNotifier::new().unwrap());
    let tracker = Arc::new(
        LootTracker::new(rest, Arc::new(ZeroSource), notifier)
            .with_pacing(10, Duration::ZERO),
    );

    tracker.hydrate().await;

    // REST order is kept: newest first, no reversal
    let snapshot = tracker.snapshot().await;
    let ids: Vec<&str> = snapshot.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);

    // Environment actor stays out of the roster
    assert_eq!(
        tracker.players().await,
        vec!["Brann".to_string(), "Kazz".to_string()]
    );

    let stats = tracker.stats().await;
    assert_eq!(stats.total_loots, 3);
    assert_eq!(stats.status, ConnectionState::Online);
    assert!(stats.session_start.is_some());
}

#[tokio::test]
async fn test_hydration_survives_api_outage() {
    let server = MockServer::start().await;
    // No mounted routes: every request fails

    let rest = DashboardRestClient::new(&server.uri()).unwrap();
    let notifier = Arc::new(DiscordNotifier::new().unwrap());
    let tracker = Arc::new(LootTracker::new(rest, Arc::new(ZeroSource), notifier));

    tracker.hydrate().await;

    assert!(tracker.snapshot().await.is_empty());
    assert_eq!(tracker.stats().await.total_loots, 0);
}
