//! Average sell price resolution against the market data API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::cache::PriceCache;
use crate::common::errors::{ClientError, Result};
use crate::common::types::PriceServer;

/// Market locations sampled for the average, fixed six-city list
pub const MARKET_LOCATIONS: &str =
    "Caerleon,Bridgewatch,Martlock,Thetford,FortSterling,Lymhurst";

/// Source of market price estimates
///
/// The seam between the enrichment pipeline and the concrete HTTP resolver.
/// Resolution is fail-soft by contract: implementations return 0 instead of
/// erroring, so callers never have to handle a pricing outage.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Average sell price for an item in silver; 0 when unknown
    async fn resolve(&self, item_id: &str) -> u64;
}

/// Per-location price record returned by the market data API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPriceRecord {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub sell_price_min: u64,
    #[serde(default)]
    pub sell_price_max: u64,
    #[serde(default)]
    pub buy_price_min: u64,
    #[serde(default)]
    pub buy_price_max: u64,
}

#[derive(Debug, Clone)]
struct Endpoint {
    server: PriceServer,
    base_url: String,
}

impl Endpoint {
    fn for_server(server: PriceServer) -> Self {
        Self {
            server,
            base_url: format!("https://{}", server.host()),
        }
    }
}

/// Price resolver with a TTL cache in front of the market data API
///
/// Consults the cache for the active endpoint first; on a miss it issues one
/// request, averages the positive minimum sell prices across the returned
/// locations and populates the cache. Any transport or parse failure is
/// treated as "no data" and yields 0 without caching, so a pricing outage
/// never blocks enrichment.
pub struct PriceResolver {
    client: Client,
    endpoint: RwLock<Endpoint>,
    cache: RwLock<PriceCache>,
}

impl PriceResolver {
    /// Create a resolver for the given pricing server
    pub fn new(server: PriceServer) -> Result<Self> {
        Self::with_timeout(server, Duration::from_secs(30))
    }

    /// Create a resolver with a custom request timeout
    pub fn with_timeout(server: PriceServer, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: RwLock::new(Endpoint::for_server(server)),
            cache: RwLock::new(PriceCache::new()),
        })
    }

    /// Point the resolver at an explicit base URL (test servers)
    pub fn with_base_url(server: PriceServer, base_url: &str) -> Result<Self> {
        let resolver = Self::new(server)?;
        {
            let mut endpoint = resolver.endpoint.try_write().map_err(|_| {
                ClientError::Internal("endpoint lock poisoned at construction".to_string())
            })?;
            endpoint.base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(resolver)
    }

    /// Currently selected pricing server
    pub async fn server(&self) -> PriceServer {
        self.endpoint.read().await.server
    }

    /// Switch the active pricing endpoint
    ///
    /// Cross-endpoint prices are not comparable, so the cache is reset.
    pub async fn set_server(&self, server: PriceServer) {
        let mut endpoint = self.endpoint.write().await;
        if endpoint.server == server {
            return;
        }
        *endpoint = Endpoint::for_server(server);
        drop(endpoint);

        self.cache.write().await.reset_all();
        debug!("Pricing endpoint switched to {}, cache reset", server);
    }

    /// Number of cached prices, for diagnostics
    pub async fn cached_prices(&self) -> usize {
        self.cache.read().await.len()
    }

    fn price_url(base_url: &str, item_id: &str) -> String {
        format!(
            "{}/item-prices/{}?locations={}",
            base_url, item_id, MARKET_LOCATIONS
        )
    }

    /// Arithmetic mean of the positive minimum sell prices, rounded
    fn average_sell_price(records: &[MarketPriceRecord]) -> u64 {
        let prices: Vec<u64> = records
            .iter()
            .map(|r| r.sell_price_min)
            .filter(|&p| p > 0)
            .collect();

        if prices.is_empty() {
            return 0;
        }

        let sum: u64 = prices.iter().sum();
        (sum as f64 / prices.len() as f64).round() as u64
    }

    async fn fetch(&self, base_url: &str, item_id: &str) -> Result<Vec<MarketPriceRecord>> {
        let url = Self::price_url(base_url, item_id);
        debug!("Fetching prices from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "Price API returned status: {}",
                response.status()
            )));
        }

        let records: Vec<MarketPriceRecord> = response.json().await?;
        Ok(records)
    }
}

#[async_trait]
impl PriceSource for PriceResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, item_id: &str) -> u64 {
        let (server, base_url) = {
            let endpoint = self.endpoint.read().await;
            (endpoint.server, endpoint.base_url.clone())
        };

        if let Some(price) = self.cache.read().await.get(server, item_id) {
            return price;
        }

        match self.fetch(&base_url, item_id).await {
            Ok(records) if !records.is_empty() => {
                let price = Self::average_sell_price(&records);
                // Stale-write window on endpoint change is acceptable: the
                // entry lands under the old server key and is never read back
                self.cache.write().await.put(server, item_id, price);
                price
            }
            Ok(_) => 0,
            Err(e) => {
                warn!("Price lookup failed for {}: {}", item_id, e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, sell_price_min: u64) -> MarketPriceRecord {
        MarketPriceRecord {
            item_id: "T4_BAG".to_string(),
            city: city.to_string(),
            sell_price_min,
            sell_price_max: 0,
            buy_price_min: 0,
            buy_price_max: 0,
        }
    }

    #[test]
    fn test_average_excludes_non_positive_minimums() {
        let records = vec![
            record("Caerleon", 1200),
            record("Bridgewatch", 0),
            record("Martlock", 900),
        ];
        assert_eq!(PriceResolver::average_sell_price(&records), 1050);
    }

    #[test]
    fn test_average_rounds() {
        let records = vec![record("Caerleon", 100), record("Martlock", 101)];
        // 100.5 rounds away from the floor
        assert_eq!(PriceResolver::average_sell_price(&records), 101);
    }

    #[test]
    fn test_all_zero_result_is_zero() {
        let records = vec![record("Caerleon", 0), record("Martlock", 0)];
        assert_eq!(PriceResolver::average_sell_price(&records), 0);
        assert_eq!(PriceResolver::average_sell_price(&[]), 0);
    }

    #[test]
    fn test_price_url_shape() {
        let url = PriceResolver::price_url("https://west.albion-online-data.com", "T4_BAG");
        assert_eq!(
            url,
            "https://west.albion-online-data.com/item-prices/T4_BAG?locations=Caerleon,Bridgewatch,Martlock,Thetford,FortSterling,Lymhurst"
        );
    }

    #[tokio::test]
    async fn test_set_server_resets_cache() {
        let resolver = PriceResolver::new(PriceServer::West).unwrap();
        resolver
            .cache
            .write()
            .await
            .put(PriceServer::West, "T4_BAG", 1200);
        assert_eq!(resolver.cached_prices().await, 1);

        resolver.set_server(PriceServer::Europe).await;
        assert_eq!(resolver.server().await, PriceServer::Europe);
        assert_eq!(resolver.cached_prices().await, 0);
    }

    #[tokio::test]
    async fn test_set_same_server_keeps_cache() {
        let resolver = PriceResolver::new(PriceServer::West).unwrap();
        resolver
            .cache
            .write()
            .await
            .put(PriceServer::West, "T4_BAG", 1200);

        resolver.set_server(PriceServer::West).await;
        assert_eq!(resolver.cached_prices().await, 1);
    }
}
