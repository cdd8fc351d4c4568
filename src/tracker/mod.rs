//! Applies stream events to the live session state
//!
//! The tracker is the single consumer of the event channel: log, roster and
//! stats mutations happen in arrival order, while price resolutions progress
//! independently and reconcile back through the store's guarded patches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::common::errors::Result;
use crate::common::types::{LootEvent, SessionStats, StreamEvent};
use crate::dashboard::DashboardRestClient;
use crate::notify::DiscordNotifier;
use crate::pricing::{EnrichmentScheduler, PriceSource};
use crate::store::{LootLog, Roster};
use crate::view::tier;

/// How many records to request when hydrating from the REST API
pub const HISTORY_LIMIT: u32 = 100;

/// Live session state driven by the dashboard stream
pub struct LootTracker {
    log: Arc<RwLock<LootLog>>,
    roster: Arc<RwLock<Roster>>,
    stats: Arc<RwLock<SessionStats>>,
    prices: Arc<dyn PriceSource>,
    scheduler: EnrichmentScheduler,
    notifier: Arc<DiscordNotifier>,
    rest: DashboardRestClient,
    stream_connected: AtomicBool,
}

impl LootTracker {
    pub fn new(
        rest: DashboardRestClient,
        prices: Arc<dyn PriceSource>,
        notifier: Arc<DiscordNotifier>,
    ) -> Self {
        let log = Arc::new(RwLock::new(LootLog::new()));
        let scheduler = EnrichmentScheduler::new(Arc::clone(&log), Arc::clone(&prices));

        Self {
            log,
            roster: Arc::new(RwLock::new(Roster::new())),
            stats: Arc::new(RwLock::new(SessionStats::default())),
            prices,
            scheduler,
            notifier,
            rest,
            stream_connected: AtomicBool::new(false),
        }
    }

    /// Override enrichment batching and pacing (tests)
    pub fn with_pacing(mut self, batch_size: usize, batch_delay: Duration) -> Self {
        self.scheduler = self.scheduler.clone().with_pacing(batch_size, batch_delay);
        self
    }

    /// Whether the raw stream connection is up; independent of the coarse
    /// capture status in the stats
    pub fn is_stream_connected(&self) -> bool {
        self.stream_connected.load(Ordering::SeqCst)
    }

    /// Owned snapshot of the log, newest first, for pure view derivation
    pub async fn snapshot(&self) -> Vec<LootEvent> {
        self.log.read().await.snapshot()
    }

    pub async fn players(&self) -> Vec<String> {
        self.roster.read().await.players().to_vec()
    }

    pub async fn stats(&self) -> SessionStats {
        self.stats.read().await.clone()
    }

    /// Consume stream events until the channel closes
    pub async fn run(self: Arc<Self>, mut receiver: mpsc::Receiver<StreamEvent>) {
        while let Some(event) = receiver.recv().await {
            self.handle_event(event).await;
        }
    }

    /// Apply one stream event
    pub async fn handle_event(self: &Arc<Self>, event: StreamEvent) {
        match event {
            StreamEvent::Connected => {
                info!("Stream connected");
                self.stream_connected.store(true, Ordering::SeqCst);
            }
            StreamEvent::Disconnected { reason } => {
                info!("Stream disconnected: {:?}", reason);
                self.stream_connected.store(false, Ordering::SeqCst);
            }
            StreamEvent::NewLoot(loot) => self.on_new_loot(loot).await,
            StreamEvent::Stats(update) => {
                self.stats.write().await.merge(update);
            }
            StreamEvent::Status(status) => {
                self.stats.write().await.status = status;
            }
            StreamEvent::History(loots) => self.on_history(loots).await,
            StreamEvent::Clear => {
                self.log.write().await.clear();
                self.roster.write().await.clear();
                self.stats.write().await.reset_counters();
                info!("Session cleared");
            }
            StreamEvent::Raw(text) => {
                debug!("Unhandled stream message: {}", text);
            }
        }
    }

    /// Merge a single new record, then resolve its price in the background
    ///
    /// The record is visible immediately with an unknown price. The spawned
    /// resolution races any concurrent sweep; the store's still-unset guard
    /// keeps the two paths from clobbering each other, and a patch for an
    /// evicted id is a silent no-op.
    async fn on_new_loot(self: &Arc<Self>, mut loot: LootEvent) {
        if loot.tier.display.is_empty() {
            if let Some(descriptor) = tier::derive_descriptor(&loot.item_id) {
                loot.tier = descriptor;
            }
        }

        self.log.write().await.merge_one(loot.clone());
        self.roster.write().await.observe(&loot.looted_by);
        debug!("Merged loot {} ({})", loot.id, loot.item_id);

        let tracker = Arc::clone(self);
        tokio::spawn(async move {
            let price = tracker.prices.resolve(&loot.item_id).await;
            tracker.log.write().await.patch_price(&loot.id, price);

            loot.estimated_price = Some(price);
            tracker.notifier.maybe_notify(&loot).await;
        });
    }

    /// Install a bulk history payload and sweep-enrich it
    ///
    /// The payload arrives oldest first; reversal yields the log's
    /// newest-first order.
    async fn on_history(self: &Arc<Self>, mut loots: Vec<LootEvent>) {
        loots.reverse();
        for loot in &mut loots {
            if loot.tier.display.is_empty() {
                if let Some(descriptor) = tier::derive_descriptor(&loot.item_id) {
                    loot.tier = descriptor;
                }
            }
        }

        let item_ids = {
            let mut log = self.log.write().await;
            log.replace_all(loots);
            self.roster.write().await.rebuild(log.entries());
            log.item_ids()
        };
        info!("History installed: {} records", item_ids.len());

        let scheduler = self.scheduler.clone();
        tokio::spawn(async move {
            scheduler.enrich(item_ids).await;
        });
    }

    /// Load recent history and stats over REST, then sweep-enrich
    ///
    /// Fail-soft: the dashboard API being down leaves an empty session that
    /// still ingests live events normally.
    #[instrument(skip(self))]
    pub async fn hydrate(self: &Arc<Self>) {
        match self.rest.get_recent_loots(HISTORY_LIMIT).await {
            Ok(loots) if !loots.is_empty() => {
                // Already newest first; no reversal on the REST path
                let mut loots = loots;
                for loot in &mut loots {
                    if loot.tier.display.is_empty() {
                        if let Some(descriptor) = tier::derive_descriptor(&loot.item_id) {
                            loot.tier = descriptor;
                        }
                    }
                }

                let item_ids = {
                    let mut log = self.log.write().await;
                    log.replace_all(loots);
                    self.roster.write().await.rebuild(log.entries());
                    log.item_ids()
                };
                info!("Hydrated {} records from REST", item_ids.len());

                let scheduler = self.scheduler.clone();
                tokio::spawn(async move {
                    scheduler.enrich(item_ids).await;
                });
            }
            Ok(_) => debug!("No recent loots to hydrate"),
            Err(e) => warn!("Failed to load recent loots: {}", e),
        }

        match self.rest.get_stats().await {
            Ok(update) => self.stats.write().await.merge(update),
            Err(e) => warn!("Failed to load stats: {}", e),
        }
    }

    /// Ask the server to clear the session; clears locally on success
    pub async fn clear_remote(&self) -> Result<bool> {
        let success = self.rest.clear().await?;
        if success {
            self.log.write().await.clear();
            self.roster.write().await.clear();
        }
        Ok(success)
    }

    /// Re-sweep prices for everything currently in the log
    ///
    /// Used after an endpoint switch. The guard semantics apply: only
    /// entries whose price is still unset are filled.
    pub async fn refresh_prices(&self) {
        let item_ids = self.log.read().await.item_ids();
        self.scheduler.enrich(item_ids).await;
    }
}
