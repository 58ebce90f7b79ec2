//! Transaction aggregator — line items to one raw RFM row per customer.
//!
//! Recency is measured against the reference date: the latest transaction
//! date in the whole input, not the wall clock and not per customer.

use crate::{
    line_item::LineItem,
    types::{CustomerId, TransactionId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRfm {
    pub customer_id:  CustomerId,
    /// Whole days between the customer's last purchase and the reference date.
    pub recency_days: u64,
    /// Distinct transaction ids, not line items.
    pub frequency:    u64,
    /// Σ quantity × unit price over every line item.
    pub monetary:     f64,
}

/// Latest transaction date across all line items. `None` for empty input.
pub fn reference_date(items: &[LineItem]) -> Option<NaiveDate> {
    items.iter().map(|item| item.date).max()
}

#[derive(Default)]
struct Accumulator {
    last_purchase: Option<NaiveDate>,
    transactions:  BTreeSet<TransactionId>,
    monetary:      f64,
}

/// Reduce line items to per-customer metrics, ordered by customer id.
///
/// `reference` must be at least as late as every date in `items`; pass
/// [`reference_date`] of the same slice.
pub fn aggregate(items: &[LineItem], reference: NaiveDate) -> Vec<CustomerRfm> {
    let mut by_customer: BTreeMap<CustomerId, Accumulator> = BTreeMap::new();

    for item in items {
        let acc = by_customer.entry(item.customer_id).or_default();
        acc.last_purchase = acc.last_purchase.max(Some(item.date));
        acc.transactions.insert(item.transaction_id);
        acc.monetary += item.amount();
    }

    by_customer
        .into_iter()
        .filter_map(|(customer_id, acc)| {
            let last = acc.last_purchase?;
            let recency_days = (reference - last).num_days().max(0) as u64;
            Some(CustomerRfm {
                customer_id,
                recency_days,
                frequency: acc.transactions.len() as u64,
                monetary: acc.monetary,
            })
        })
        .collect()
}

/// Convenience: derive the reference date and aggregate in one step.
/// Empty input yields no reference date and no rows.
pub fn aggregate_snapshot(items: &[LineItem]) -> (Option<NaiveDate>, Vec<CustomerRfm>) {
    match reference_date(items) {
        Some(reference) => (Some(reference), aggregate(items, reference)),
        None => (None, Vec::new()),
    }
}
