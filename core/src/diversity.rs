//! Product diversity segmenter — line-item volume quartiles.
//!
//! The reporting schema calls this metric "NumberOfUniqueProductsOrdered",
//! but it counts line items: repeat purchases of one product count every
//! time. That as-counted behaviour is kept; downstream consumers rely on it.
//!
//! Customers are ranked by count DESCENDING and cut into quartiles with
//! [`crate::ntile`]; quartile 1 is the highest-volume group.

use crate::{
    config::TieBreak,
    line_item::LineItem,
    ntile::rank_into_groups,
    types::CustomerId,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

pub const QUARTILES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiversityTier {
    #[serde(rename = "High Product Variety Customer")]
    High,
    #[serde(rename = "Medium-High Product Variety Customer")]
    MediumHigh,
    #[serde(rename = "Medium-Low Product Variety Customer")]
    MediumLow,
    #[serde(rename = "Low Product Variety Customer")]
    Low,
}

impl DiversityTier {
    /// Highest to lowest; index + 1 is the quartile number.
    pub const ALL: [DiversityTier; 4] = [
        DiversityTier::High,
        DiversityTier::MediumHigh,
        DiversityTier::MediumLow,
        DiversityTier::Low,
    ];

    pub fn from_quartile(quartile: usize) -> Self {
        match quartile {
            1 => DiversityTier::High,
            2 => DiversityTier::MediumHigh,
            3 => DiversityTier::MediumLow,
            _ => DiversityTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiversityTier::High       => "High Product Variety Customer",
            DiversityTier::MediumHigh => "Medium-High Product Variety Customer",
            DiversityTier::MediumLow  => "Medium-Low Product Variety Customer",
            DiversityTier::Low        => "Low Product Variety Customer",
        }
    }
}

impl fmt::Display for DiversityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDiversity {
    pub customer_id:     CustomerId,
    /// Line items, not distinct products. See module docs.
    pub line_item_count: u64,
    pub quartile:        u8,
    pub tier:            DiversityTier,
}

/// Line items per customer, ordered by customer id.
pub fn line_item_counts(items: &[LineItem]) -> Vec<(CustomerId, u64)> {
    let mut counts: BTreeMap<CustomerId, u64> = BTreeMap::new();
    for item in items {
        *counts.entry(item.customer_id).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Tier every customer present in `items`, in rank order (highest count
/// first, ties by `tie_break`).
pub fn segment_diversity(items: &[LineItem], tie_break: TieBreak) -> Vec<ProductDiversity> {
    let counts = line_item_counts(items);
    if counts.is_empty() {
        return Vec::new();
    }
    if counts.len() < QUARTILES {
        log::warn!(
            "diversity: {} customers is fewer than {QUARTILES} quartiles; lower tiers stay empty",
            counts.len()
        );
    }

    let order = |a: &(CustomerId, u64), b: &(CustomerId, u64)| {
        b.1.cmp(&a.1).then_with(|| tie_break.compare(a.0, b.0))
    };
    let quartiles = rank_into_groups(&counts, QUARTILES, order);

    let mut rows: Vec<ProductDiversity> = counts
        .iter()
        .zip(quartiles)
        .map(|(&(customer_id, line_item_count), quartile)| ProductDiversity {
            customer_id,
            line_item_count,
            quartile: quartile as u8,
            tier: DiversityTier::from_quartile(quartile),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.line_item_count
            .cmp(&a.line_item_count)
            .then_with(|| tie_break.compare(a.customer_id, b.customer_id))
    });
    rows
}
