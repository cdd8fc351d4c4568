//! Pure derived views over the event log

pub mod category;
pub mod filter;
pub mod tier;

pub use category::{classify, Category};
pub use filter::{
    category_counts, player_loot_counts, total_estimated_value, visible, FilterSpec,
};
pub use tier::{derive_descriptor, parse_item_id, parse_label, TierInfo};
