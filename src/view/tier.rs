//! Tier and enchantment parsing

use crate::common::types::Tier;

/// Tier/enchant pairs flagged as rare loot
const RARE_TIERS: &[(u8, u8)] = &[
    (4, 4),
    (5, 3),
    (5, 4),
    (6, 2),
    (6, 3),
    (6, 4),
    (7, 1),
    (7, 2),
    (7, 3),
    (7, 4),
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
];

/// Parsed tier information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierInfo {
    pub tier: u8,
    pub enchant: u8,
}

impl TierInfo {
    /// Human-readable label, e.g. `T4.2`
    pub fn display(&self) -> String {
        format!("T{}.{}", self.tier, self.enchant)
    }

    pub fn is_rare(&self) -> bool {
        RARE_TIERS.contains(&(self.tier, self.enchant))
    }

    /// Display color: the enchantment color when enchanted, the tier color
    /// otherwise
    pub fn color(&self) -> &'static str {
        enchant_color(self.enchant).unwrap_or_else(|| tier_color(self.tier))
    }
}

/// Base color of a tier
pub fn tier_color(tier: u8) -> &'static str {
    match tier {
        4 => "#3B82F6",
        5 => "#EF4444",
        6 => "#F97316",
        7 => "#EAB308",
        8 => "#FFFFFF",
        _ => "#FFFFFF",
    }
}

/// Color of an enchantment level, if enchanted
pub fn enchant_color(enchant: u8) -> Option<&'static str> {
    match enchant {
        1 => Some("#22C55E"),
        2 => Some("#3B82F6"),
        3 => Some("#A855F7"),
        4 => Some("#FFD700"),
        _ => None,
    }
}

/// Parse a tier label like `T4.2`
///
/// The tier is the digit after the first `T`, the enchant the digit after
/// the first `.` (0 when absent). Unparseable labels yield `None` and are
/// treated as "unknown" by tier-based filtering.
pub fn parse_label(label: &str) -> Option<TierInfo> {
    let bytes = label.as_bytes();

    let tier = bytes.windows(2).find_map(|pair| {
        (pair[0] == b'T' && pair[1].is_ascii_digit()).then(|| pair[1] - b'0')
    })?;

    let enchant = bytes
        .windows(2)
        .find_map(|pair| (pair[0] == b'.' && pair[1].is_ascii_digit()).then(|| pair[1] - b'0'))
        .unwrap_or(0);

    Some(TierInfo { tier, enchant })
}

/// Parse tier information out of an item identifier
///
/// Item ids follow `T{tier}_NAME` with an optional `@{enchant}` suffix,
/// e.g. `T4_BAG@2`. Anything else is unparseable.
pub fn parse_item_id(item_id: &str) -> Option<TierInfo> {
    let bytes = item_id.as_bytes();
    if bytes.len() < 3
        || bytes[0].to_ascii_uppercase() != b'T'
        || !bytes[1].is_ascii_digit()
        || bytes[2] != b'_'
    {
        return None;
    }

    let tier = bytes[1] - b'0';
    let enchant = item_id
        .split_once('@')
        .and_then(|(_, suffix)| suffix.as_bytes().first().copied())
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .unwrap_or(0);

    Some(TierInfo { tier, enchant })
}

/// Derive a full tier descriptor from an item identifier
///
/// Used when an inbound record carries no tier label; an unparseable id
/// yields `None` and the record keeps its empty descriptor.
pub fn derive_descriptor(item_id: &str) -> Option<Tier> {
    let info = parse_item_id(item_id)?;
    Some(Tier {
        display: info.display(),
        color: info.color().to_string(),
        is_rare: info.is_rare(),
    })
}
