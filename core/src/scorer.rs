//! Quantile scorer — population-relative R, F and M scores in 1..=5.
//!
//! Each metric is ranked independently over the whole customer population
//! and cut into quintiles with [`crate::ntile`]:
//!   - Recency:   days-since-purchase DESCENDING, so the most recent buyers score 5
//!   - Frequency: ascending, most frequent buyers score 5
//!   - Monetary:  ascending, biggest spenders score 5
//! Equal metric values are ordered by the configured [`TieBreak`].
//! Monetary is compared in whole cents, so sums that differ only by float
//! rounding count as equal.

use crate::{
    aggregator::CustomerRfm,
    config::TieBreak,
    ntile::rank_into_groups,
    types::{CustomerId, Score},
};
use serde::{Deserialize, Serialize};

pub const QUINTILES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmScore {
    pub customer_id:  CustomerId,
    pub recency_days: u64,
    pub frequency:    u64,
    pub monetary:     f64,
    pub r_score:      Score,
    pub f_score:      Score,
    pub m_score:      Score,
}

/// Monetary value rounded to whole cents, as an ordering key.
pub fn monetary_cents(monetary: f64) -> f64 {
    (monetary * 100.0).round()
}

/// Score every customer. Output keeps the input order.
pub fn score_population(rows: &[CustomerRfm], tie_break: TieBreak) -> Vec<RfmScore> {
    if rows.is_empty() {
        return Vec::new();
    }
    if rows.len() < QUINTILES {
        log::warn!(
            "scorer: {} customers is fewer than {QUINTILES} quintiles; upper score groups stay empty",
            rows.len()
        );
    }

    let r = rank_into_groups(rows, QUINTILES, |a, b| {
        b.recency_days
            .cmp(&a.recency_days)
            .then_with(|| tie_break.compare(a.customer_id, b.customer_id))
    });
    let f = rank_into_groups(rows, QUINTILES, |a, b| {
        a.frequency
            .cmp(&b.frequency)
            .then_with(|| tie_break.compare(a.customer_id, b.customer_id))
    });
    let m = rank_into_groups(rows, QUINTILES, |a, b| {
        monetary_cents(a.monetary)
            .total_cmp(&monetary_cents(b.monetary))
            .then_with(|| tie_break.compare(a.customer_id, b.customer_id))
    });

    rows.iter()
        .enumerate()
        .map(|(i, row)| RfmScore {
            customer_id:  row.customer_id,
            recency_days: row.recency_days,
            frequency:    row.frequency,
            monetary:     row.monetary,
            r_score:      r[i] as Score,
            f_score:      f[i] as Score,
            m_score:      m[i] as Score,
        })
        .collect()
}
