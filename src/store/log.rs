//! Capacity-bounded, insertion-ordered loot event log
//!
//! The log is the single source of truth for observed loot. Merges keep it
//! newest-first, id-unique and capped; asynchronous price patches reconcile
//! by id and silently no-op when the target has been evicted or cleared.

use std::collections::HashMap;

use crate::common::types::LootEvent;

/// Maximum number of retained entries; oldest entries drop silently
pub const LOG_CAPACITY: usize = 500;

/// The event log store
///
/// Entries are indexed by id for patch reconciliation. Lookups go through
/// the index and replace conditionally in place; no entry reference is ever
/// held across an await point.
#[derive(Debug, Clone)]
pub struct LootLog {
    capacity: usize,
    entries: Vec<LootEvent>,
    index: HashMap<String, usize>,
}

impl LootLog {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    /// Create a log with a custom capacity cap
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Prepend a new event, dropping the oldest entries past the cap
    ///
    /// The estimated price starts unset regardless of the inbound value. A
    /// record with an already-present id replaces the stale entry instead of
    /// duplicating it.
    pub fn merge_one(&mut self, mut event: LootEvent) {
        event.estimated_price = None;

        if let Some(&pos) = self.index.get(&event.id) {
            self.entries.remove(pos);
        }

        self.entries.insert(0, event);
        self.entries.truncate(self.capacity);
        self.reindex();
    }

    /// Install a new ordered log wholesale
    ///
    /// Each entry's estimated price is reset; duplicate ids keep their first
    /// occurrence. Used for bulk history hydration.
    pub fn replace_all(&mut self, events: Vec<LootEvent>) {
        self.entries.clear();
        self.index.clear();

        for mut event in events {
            if self.index.contains_key(&event.id) {
                continue;
            }
            event.estimated_price = None;
            self.index.insert(event.id.clone(), self.entries.len());
            self.entries.push(event);
        }

        if self.entries.len() > self.capacity {
            self.entries.truncate(self.capacity);
            self.reindex();
        }
    }

    /// Patch the resolved price into the entry with this id
    ///
    /// Writes only when the price is still unset, so a slow resolution never
    /// clobbers a value another path already wrote. Returns false when the
    /// entry is absent or already priced; both are expected, not errors.
    pub fn patch_price(&mut self, id: &str, price: u64) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                if entry.estimated_price.is_none() {
                    entry.estimated_price = Some(price);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Patch every present entry with this item id and an unset price
    ///
    /// Returns the number of entries patched.
    pub fn patch_item_prices(&mut self, item_id: &str, price: u64) -> usize {
        let mut patched = 0;
        for entry in &mut self.entries {
            if entry.item_id == item_id && entry.estimated_price.is_none() {
                entry.estimated_price = Some(price);
                patched += 1;
            }
        }
        patched
    }

    /// Empty the log
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Current entries, newest first
    pub fn entries(&self) -> &[LootEvent] {
        &self.entries
    }

    /// Owned copy of the current entries for filtering off-lock
    pub fn snapshot(&self) -> Vec<LootEvent> {
        self.entries.clone()
    }

    /// Item ids of all current entries, in log order (may repeat)
    pub fn item_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.item_id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, entry) in self.entries.iter().enumerate() {
            self.index.insert(entry.id.clone(), pos);
        }
    }
}

impl Default for LootLog {
    fn default() -> Self {
        Self::new()
    }
}
