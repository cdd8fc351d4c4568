//! LootDashboard - Main Entry Point
//!
//! Connects to the dashboard event stream, keeps the session log enriched
//! with market prices and forwards notable loot to Discord.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use loot_dashboard::common::channels;
use loot_dashboard::common::types::PriceServer;
use loot_dashboard::config::loader;
use loot_dashboard::config::settings::{UserSettings, SETTINGS_FILE};
use loot_dashboard::dashboard::{DashboardRestClient, DashboardWebSocketClient};
use loot_dashboard::notify::DiscordNotifier;
use loot_dashboard::pricing::{PriceResolver, PriceSource};
use loot_dashboard::tracker::LootTracker;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Path to the persisted user settings file
    #[arg(long, default_value = SETTINGS_FILE)]
    settings: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Pricing server to use (west, europe, east); persisted when given
    #[arg(long)]
    price_server: Option<String>,

    /// Discord webhook URL for notifications; persisted when given
    #[arg(long)]
    webhook: Option<String>,
}

/// Startup banner, printed once per session
fn print_banner() {
    static BANNER: Once = Once::new();
    BANNER.call_once(|| {
        info!("Loot Dashboard v{}", env!("CARGO_PKG_VERSION"));
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    print_banner();
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = loader::load_config(Some(&args.config))?;
    let mut settings = UserSettings::load(&args.settings);

    if let Some(server) = args.price_server.as_deref() {
        settings.price_server = match server.to_lowercase().as_str() {
            "west" => PriceServer::West,
            "europe" => PriceServer::Europe,
            "east" => PriceServer::East,
            other => {
                warn!("Unknown price server '{}', keeping {}", other, settings.price_server);
                settings.price_server
            }
        };
        settings.save(&args.settings)?;
    }

    if let Some(webhook) = args.webhook.as_deref() {
        // Reject a bad URL before it is stored or used
        DiscordNotifier::validate_url(webhook)?;
        settings.discord_webhook = webhook.to_string();
        settings.save(&args.settings)?;
    }

    info!(
        "Pricing server: {} ({})",
        settings.price_server,
        settings.price_server.host()
    );

    let resolver = Arc::new(PriceResolver::new(settings.price_server)?);
    let notifier = Arc::new(DiscordNotifier::new()?);
    if !settings.discord_webhook.is_empty() {
        if let Err(e) = notifier.set_webhook(&settings.discord_webhook).await {
            warn!("Ignoring stored webhook: {}", e);
        }
    }

    let rest = DashboardRestClient::with_timeout(
        &config.dashboard.base_url,
        Duration::from_secs(config.settings.request_timeout_seconds),
    )?;

    let prices: Arc<dyn PriceSource> = resolver.clone();
    let tracker = Arc::new(LootTracker::new(rest, prices, notifier.clone()));

    // Fill the session from the REST API before the stream starts
    tracker.hydrate().await;

    let (event_sender, event_receiver) = channels::create_event_channel();
    let tracker_task = tokio::spawn(Arc::clone(&tracker).run(event_receiver));

    // Connection loop: reconnect with the configured delay until told to stop
    let websocket_url = config.dashboard.websocket_url.clone();
    let reconnect_delay = Duration::from_millis(config.settings.reconnect_delay_ms);
    let max_attempts = config.settings.max_reconnect_attempts;

    let connection_task = tokio::spawn(async move {
        let mut attempts: u32 = 0;
        loop {
            let mut client = DashboardWebSocketClient::new(&websocket_url);
            match client.connect(event_sender.clone()).await {
                Ok(()) => {
                    attempts = 0;
                    while client.is_connected() {
                        sleep(Duration::from_secs(1)).await;
                    }
                    warn!("Stream connection lost");
                }
                Err(e) => {
                    error!("Failed to connect: {}", e);
                }
            }

            attempts += 1;
            if max_attempts > 0 && attempts >= max_attempts {
                error!("Giving up after {} connection attempts", attempts);
                break;
            }
            sleep(reconnect_delay).await;
            info!("Reconnecting to dashboard stream...");
        }
    });

    info!("Application initialized successfully");

    // Keep the application running
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, cleaning up...");

    connection_task.abort();
    tracker_task.abort();

    Ok(())
}
