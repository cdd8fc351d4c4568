//! Pure derivation of visible records and aggregates
//!
//! Everything here is a function of a log snapshot and a filter
//! specification; nothing mutates and nothing depends on call order.

use std::collections::{HashMap, HashSet};

use super::category::{classify, Category};
use super::tier;
use crate::common::types::LootEvent;

/// Filter specification
///
/// Value object, replaced wholesale on change. Empty sets mean
/// "unrestricted" for tiers, categories and players.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring match against item name, item id, looter
    /// and source names
    pub search: String,
    pub tiers: HashSet<u8>,
    pub categories: HashSet<Category>,
    pub players: HashSet<String>,
    pub rare_only: bool,
}

impl FilterSpec {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = u8>) -> Self {
        self.tiers = tiers.into_iter().collect();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = String>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    pub fn rare_only(mut self, rare_only: bool) -> Self {
        self.rare_only = rare_only;
        self
    }
}

/// Whether a single record passes the specification
pub fn matches(event: &LootEvent, spec: &FilterSpec) -> bool {
    if !spec.search.is_empty() {
        let search = spec.search.to_lowercase();
        let hit = event.item_name.to_lowercase().contains(&search)
            || event.item_id.to_lowercase().contains(&search)
            || event.looted_by.name.to_lowercase().contains(&search)
            || event.looted_from.name.to_lowercase().contains(&search);
        if !hit {
            return false;
        }
    }

    // Unparseable tier labels pass: unknown tiers are not filtered out
    if !spec.tiers.is_empty() {
        if let Some(info) = tier::parse_label(&event.tier.display) {
            if !spec.tiers.contains(&info.tier) {
                return false;
            }
        }
    }

    if !spec.categories.is_empty() && !spec.categories.contains(&classify(&event.item_id)) {
        return false;
    }

    if !spec.players.is_empty() && !spec.players.contains(&event.looted_by.name) {
        return false;
    }

    if spec.rare_only && !event.tier.is_rare {
        return false;
    }

    true
}

/// The visible subset of a log snapshot, preserving log order
pub fn visible<'a>(log: &'a [LootEvent], spec: &FilterSpec) -> Vec<&'a LootEvent> {
    log.iter().filter(|event| matches(event, spec)).collect()
}

/// Total estimated value of a visible set
///
/// Sums price times quantity over records with a known positive price;
/// unknown and non-positive prices contribute zero.
pub fn total_estimated_value(entries: &[&LootEvent]) -> u64 {
    entries
        .iter()
        .filter_map(|event| event.estimated_total())
        .sum()
}

/// Record count per derived category over the whole log
pub fn category_counts(log: &[LootEvent]) -> HashMap<Category, usize> {
    let mut counts = HashMap::new();
    for event in log {
        *counts.entry(classify(&event.item_id)).or_insert(0) += 1;
    }
    counts
}

/// Record count per acting player over the whole log
pub fn player_loot_counts(log: &[LootEvent]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for event in log {
        *counts.entry(event.looted_by.name.clone()).or_insert(0) += 1;
    }
    counts
}
