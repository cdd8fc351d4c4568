//! Item category classification

use serde::{Deserialize, Serialize};

/// Derived item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Equipment,
    Consumable,
    Rune,
    Resource,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 5] = [
        Category::Equipment,
        Category::Consumable,
        Category::Rune,
        Category::Resource,
        Category::Other,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Equipment => write!(f, "equipment"),
            Category::Consumable => write!(f, "consumable"),
            Category::Rune => write!(f, "rune"),
            Category::Resource => write!(f, "resource"),
            Category::Other => write!(f, "other"),
        }
    }
}

const EQUIPMENT_TOKENS: &[&str] = &[
    "_ARMOR_", "_SHOES_", "_HEAD_", "_CAPE", "_BAG", "_MOUNT_", "_2H_", "_MAIN_", "_OFF_",
    "WEAPON", "SHIELD", "_TOOL_",
];

const CONSUMABLE_TOKENS: &[&str] = &["POTION", "FOOD", "MEAL", "FISH", "_COOKED"];

const RUNE_TOKENS: &[&str] = &["RUNE", "SOUL", "RELIC"];

const RESOURCE_TOKENS: &[&str] = &[
    "_ROCK", "_ORE", "_HIDE", "_WOOD", "_FIBER", "_PLANKS", "_METALBAR", "_LEATHER", "_CLOTH",
];

/// Classify an item identifier into exactly one category
///
/// Rules are checked in a fixed order against the upper-cased id; the first
/// matching token set wins, anything unmatched is `Other`.
pub fn classify(item_id: &str) -> Category {
    let id = item_id.to_uppercase();
    let contains_any = |tokens: &[&str]| tokens.iter().any(|t| id.contains(t));

    if contains_any(EQUIPMENT_TOKENS) {
        Category::Equipment
    } else if contains_any(CONSUMABLE_TOKENS) {
        Category::Consumable
    } else if contains_any(RUNE_TOKENS) {
        Category::Rune
    } else if contains_any(RESOURCE_TOKENS) {
        Category::Resource
    } else {
        Category::Other
    }
}
