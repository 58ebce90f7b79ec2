//! Segmenter trait and the two segmentation pipelines.
//!
//! RULE: Every segmentation implements Segmenter.
//! A segmenter sees the whole line-item snapshot and returns a complete,
//! freshly computed result set. Segmenters never read each other's output.

use crate::{
    aggregator::{aggregate, reference_date},
    classifier::{classify_population, CustomerSegment},
    config::TieBreak,
    diversity::{segment_diversity, ProductDiversity},
    error::SegResult,
    line_item::LineItem,
    scorer::score_population,
};
use chrono::NaiveDate;

/// The input of one run. The reference date is derived here, once, and
/// every segmenter reads it from the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub items:          &'a [LineItem],
    /// Latest transaction date in `items`; `None` when `items` is empty.
    pub reference_date: Option<NaiveDate>,
}

impl<'a> Snapshot<'a> {
    pub fn new(items: &'a [LineItem]) -> Self {
        Self { items, reference_date: reference_date(items) }
    }
}

/// The contract every segmentation pipeline must fulfill.
pub trait Segmenter {
    type Row;

    /// Unique stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Compute one row per customer present in the snapshot.
    /// Empty input yields an empty result, never an error.
    fn segment(&self, snapshot: &Snapshot<'_>) -> SegResult<Vec<Self::Row>>;
}

/// Aggregate → quintile scores → rule table. Rows come out in customer id order.
pub struct RfmSegmenter {
    tie_break: TieBreak,
}

impl RfmSegmenter {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

impl Segmenter for RfmSegmenter {
    type Row = CustomerSegment;

    fn name(&self) -> &'static str { "rfm" }

    fn segment(&self, snapshot: &Snapshot<'_>) -> SegResult<Vec<CustomerSegment>> {
        let Some(reference) = snapshot.reference_date else {
            return Ok(Vec::new());
        };
        let customers = aggregate(snapshot.items, reference);
        log::debug!(
            "rfm: aggregated {} line items into {} customers (reference date {reference})",
            snapshot.items.len(),
            customers.len(),
        );
        let scores = score_population(&customers, self.tie_break);
        classify_population(scores)
    }
}

/// Line-item count quartiles. Rows come out in rank order.
pub struct DiversitySegmenter {
    tie_break: TieBreak,
}

impl DiversitySegmenter {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

impl Segmenter for DiversitySegmenter {
    type Row = ProductDiversity;

    fn name(&self) -> &'static str { "diversity" }

    fn segment(&self, snapshot: &Snapshot<'_>) -> SegResult<Vec<ProductDiversity>> {
        Ok(segment_diversity(snapshot.items, self.tie_break))
    }
}
