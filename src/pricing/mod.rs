//! Price cache, resolver and enrichment scheduling

pub mod cache;
pub mod resolver;
pub mod scheduler;

pub use cache::{PriceCache, PriceKey, PRICE_TTL};
pub use resolver::{MarketPriceRecord, PriceResolver, PriceSource, MARKET_LOCATIONS};
pub use scheduler::{EnrichmentScheduler, ENRICH_BATCH_DELAY, ENRICH_BATCH_SIZE};
