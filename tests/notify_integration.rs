//! Integration tests for the notification dispatcher

mod common;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::sample_loot;
use loot_dashboard::notify::DiscordNotifier;

#[tokio::test]
async fn test_rare_loot_is_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(serde_json::json!({
            "embeds": [{"title": "T4_ORE"}]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new().unwrap();
    notifier
        .set_webhook(&format!("{}/hook", server.uri()))
        .await
        .unwrap();

    let mut loot = sample_loot("a", "T4_ORE", "Kazz");
    loot.tier.is_rare = true;
    loot.estimated_price = Some(10);
    notifier.maybe_notify(&loot).await;
}

#[tokio::test]
async fn test_high_value_loot_is_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new().unwrap();
    notifier
        .set_webhook(&format!("{}/hook", server.uri()))
        .await
        .unwrap();

    let mut loot = sample_loot("a", "T4_ORE", "Kazz");
    loot.estimated_price = Some(250_000);
    notifier.maybe_notify(&loot).await;
}

#[tokio::test]
async fn test_unremarkable_loot_is_not_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new().unwrap();
    notifier
        .set_webhook(&format!("{}/hook", server.uri()))
        .await
        .unwrap();

    let mut loot = sample_loot("a", "T4_ORE", "Kazz");
    loot.estimated_price = Some(40);
    notifier.maybe_notify(&loot).await;
}

#[tokio::test]
async fn test_delivery_failure_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new().unwrap();
    notifier
        .set_webhook(&format!("{}/hook", server.uri()))
        .await
        .unwrap();

    let mut loot = sample_loot("a", "T4_ORE", "Kazz");
    loot.tier.is_rare = true;
    // Must not panic or surface the failure
    notifier.maybe_notify(&loot).await;
}

#[tokio::test]
async fn test_send_test_requires_discord_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = DiscordNotifier::new().unwrap();
    notifier
        .set_webhook(&format!("{}/hook", server.uri()))
        .await
        .unwrap();

    // Sanity check fires before any network call
    assert!(notifier.send_test().await.is_err());
}
