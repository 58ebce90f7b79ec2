//! Result bundle and distribution summaries for consumers of a run.

use crate::{
    classifier::{CustomerSegment, Segment},
    diversity::{DiversityTier, ProductDiversity},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCount {
    pub segment: Segment,
    pub count:   u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier:  DiversityTier,
    pub count: u64,
}

/// Everything one run produces. The two result sets are independent;
/// join them on customer id if needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationReport {
    /// Latest transaction date in the input. `None` for empty input.
    pub reference_date:       Option<NaiveDate>,
    pub line_items:           u64,
    pub rfm:                  Vec<CustomerSegment>,
    pub diversity:            Vec<ProductDiversity>,
    pub segment_distribution: Vec<SegmentCount>,
    pub tier_distribution:    Vec<TierCount>,
}

impl SegmentationReport {
    pub fn customer_count(&self) -> usize {
        self.rfm.len()
    }
}

/// Customers per segment, most populated first. Ties follow rule-table
/// order. Segments nobody landed in are omitted.
pub fn segment_distribution(rows: &[CustomerSegment]) -> Vec<SegmentCount> {
    let mut counts: HashMap<Segment, u64> = HashMap::new();
    for row in rows {
        *counts.entry(row.segment).or_insert(0) += 1;
    }

    let mut out: Vec<SegmentCount> = counts
        .into_iter()
        .map(|(segment, count)| SegmentCount { segment, count })
        .collect();
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.segment.rank().cmp(&b.segment.rank()))
    });
    out
}

/// Customers per tier, highest tier first. Every tier is listed.
pub fn tier_distribution(rows: &[ProductDiversity]) -> Vec<TierCount> {
    DiversityTier::ALL
        .iter()
        .map(|&tier| TierCount {
            tier,
            count: rows.iter().filter(|r| r.tier == tier).count() as u64,
        })
        .collect()
}
