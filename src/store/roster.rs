//! Roster of player names observed in the log

use crate::common::types::{Actor, LootEvent};

/// Insertion-ordered distinct actor names
///
/// Environment-sourced actors (`@` prefix) never enter the roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an acting entity, ignoring environment names and duplicates
    pub fn observe(&mut self, actor: &Actor) {
        if actor.is_environment() {
            return;
        }
        if !self.players.iter().any(|p| p == &actor.name) {
            self.players.push(actor.name.clone());
        }
    }

    /// Rebuild the roster from a log snapshot
    pub fn rebuild(&mut self, entries: &[LootEvent]) {
        self.players.clear();
        for entry in entries {
            self.observe(&entry.looted_by);
        }
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Tier;
    use chrono::Utc;

    fn event_by(name: &str) -> LootEvent {
        LootEvent {
            id: format!("id-{name}"),
            timestamp: Utc::now(),
            item_id: "T4_ORE".to_string(),
            item_name: "Ore".to_string(),
            quantity: 1,
            tier: Tier::default(),
            looted_by: Actor::new(name),
            looted_from: Actor::new("MOB_KEEPER"),
            estimated_price: None,
        }
    }

    #[test]
    fn test_observe_excludes_environment_names() {
        let mut roster = Roster::new();
        roster.observe(&Actor::new("Kazz"));
        roster.observe(&Actor::new("@LOOTCHEST_STANDARD"));
        roster.observe(&Actor::new("Kazz"));
        roster.observe(&Actor::new("Brann"));

        assert_eq!(roster.players(), &["Kazz".to_string(), "Brann".to_string()]);
    }

    #[test]
    fn test_rebuild_from_snapshot() {
        let mut roster = Roster::new();
        roster.observe(&Actor::new("Stale"));

        let entries = vec![event_by("Kazz"), event_by("@CHEST"), event_by("Kazz")];
        roster.rebuild(&entries);

        assert_eq!(roster.players(), &["Kazz".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut roster = Roster::new();
        roster.observe(&Actor::new("Kazz"));
        roster.clear();
        assert!(roster.is_empty());
    }
}
