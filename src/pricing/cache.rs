//! Keyed lookup table of previously resolved prices

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::common::types::PriceServer;

/// How long a resolved price stays valid
pub const PRICE_TTL: Duration = Duration::from_secs(300);

/// Cache key: prices are only comparable within one pricing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceKey {
    pub server: PriceServer,
    pub item_id: String,
}

impl PriceKey {
    pub fn new(server: PriceServer, item_id: impl Into<String>) -> Self {
        Self {
            server,
            item_id: item_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: u64,
    resolved_at: Instant,
}

/// TTL cache for resolved prices
///
/// Expiry is checked on read; stale entries are simply treated as absent.
/// There is no eviction beyond the full reset on endpoint change, so growth
/// within a session is unbounded.
#[derive(Debug, Clone)]
pub struct PriceCache {
    ttl: Duration,
    entries: HashMap<PriceKey, CachedPrice>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::with_ttl(PRICE_TTL)
    }

    /// Create a cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Cached price, only if present and younger than the TTL
    pub fn get(&self, server: PriceServer, item_id: &str) -> Option<u64> {
        let key = PriceKey::new(server, item_id);
        self.entries
            .get(&key)
            .filter(|cached| cached.resolved_at.elapsed() < self.ttl)
            .map(|cached| cached.price)
    }

    /// Store a resolved price with the current time
    pub fn put(&mut self, server: PriceServer, item_id: &str, price: u64) {
        self.entries.insert(
            PriceKey::new(server, item_id),
            CachedPrice {
                price,
                resolved_at: Instant::now(),
            },
        );
    }

    /// Clear everything, regardless of age; invoked on endpoint change
    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}
