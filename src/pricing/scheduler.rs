//! Batched, paced enrichment of the event log

use futures_util::future;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::debug;

use super::resolver::PriceSource;
use crate::store::LootLog;

/// Upper bound on concurrently outstanding price requests
pub const ENRICH_BATCH_SIZE: usize = 10;

/// Pause between batches, respecting the pricing API's implicit rate limit
pub const ENRICH_BATCH_DELAY: Duration = Duration::from_millis(200);

/// Fans price resolution out over the log in bounded batches
///
/// Each resolution reconciles into the log immediately on completion, by
/// item id and only into entries whose price is still unset — record
/// positions are never assumed stable while a fetch is in flight.
#[derive(Clone)]
pub struct EnrichmentScheduler {
    log: Arc<RwLock<LootLog>>,
    source: Arc<dyn PriceSource>,
    batch_size: usize,
    batch_delay: Duration,
}

impl EnrichmentScheduler {
    pub fn new(log: Arc<RwLock<LootLog>>, source: Arc<dyn PriceSource>) -> Self {
        Self {
            log,
            source,
            batch_size: ENRICH_BATCH_SIZE,
            batch_delay: ENRICH_BATCH_DELAY,
        }
    }

    /// Override batching and pacing (tests)
    pub fn with_pacing(mut self, batch_size: usize, batch_delay: Duration) -> Self {
        self.batch_size = batch_size.max(1);
        self.batch_delay = batch_delay;
        self
    }

    /// Resolve prices for the given item ids and patch them into the log
    ///
    /// Ids are deduplicated preserving first occurrence. Batch members
    /// resolve concurrently; the next batch starts only after the whole
    /// batch finished plus the pacing delay. A single item resolving to
    /// "unknown" patches 0 like any other value and never aborts the sweep.
    pub async fn enrich(&self, item_ids: Vec<String>) {
        let mut seen = HashSet::new();
        let unique: Vec<String> = item_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if unique.is_empty() {
            return;
        }
        debug!("Enriching {} distinct item ids", unique.len());

        let total = unique.len();
        for (batch_index, batch) in unique.chunks(self.batch_size).enumerate() {
            let tasks = batch.iter().map(|item_id| {
                let source = Arc::clone(&self.source);
                let log = Arc::clone(&self.log);
                let item_id = item_id.clone();
                async move {
                    let price = source.resolve(&item_id).await;
                    let patched = log.write().await.patch_item_prices(&item_id, price);
                    if patched > 0 {
                        debug!("Patched {} entries of {} at {}", patched, item_id, price);
                    }
                }
            });

            future::join_all(tasks).await;

            let resolved = (batch_index + 1) * self.batch_size;
            if resolved < total {
                sleep(self.batch_delay).await;
            }
        }
    }
}
