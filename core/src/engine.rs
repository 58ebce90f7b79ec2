//! The segmentation engine — one full recompute over a line-item snapshot.
//!
//! EXECUTION ORDER (fixed):
//!   1. RFM segmenter        (aggregate → quintile scores → rule table)
//!   2. Diversity segmenter  (line-item counts → quartiles)
//!   3. Report assembly      (result ordering, distributions)
//!
//! RULES:
//!   - Both segmenters read the same snapshot; neither sees the other's output.
//!   - Nothing is carried between runs. Every run recomputes everything.
//!   - The reference date comes from the data, never from the wall clock.
//!     It is derived once per run in the snapshot.

use crate::{
    config::{RfmOrder, SegmentationConfig},
    error::SegResult,
    line_item::LineItem,
    report::{segment_distribution, tier_distribution, SegmentationReport},
    scorer::monetary_cents,
    segmenter::{DiversitySegmenter, RfmSegmenter, Segmenter, Snapshot},
};

pub struct SegmentationEngine {
    pub config: SegmentationConfig,
    rfm:        RfmSegmenter,
    diversity:  DiversitySegmenter,
}

impl SegmentationEngine {
    pub fn new(config: SegmentationConfig) -> Self {
        Self {
            rfm:       RfmSegmenter::new(config.tie_break),
            diversity: DiversitySegmenter::new(config.tie_break),
            config,
        }
    }

    /// Run both segmentations over `items`.
    pub fn run(&self, items: &[LineItem]) -> SegResult<SegmentationReport> {
        let snapshot = Snapshot::new(items);

        let mut rfm = self.rfm.segment(&snapshot)?;
        match self.config.report.rfm_order {
            RfmOrder::MonetaryDescending => rfm.sort_by(|a, b| {
                monetary_cents(b.monetary)
                    .total_cmp(&monetary_cents(a.monetary))
                    .then_with(|| a.customer_id.cmp(&b.customer_id))
            }),
            RfmOrder::CustomerId => rfm.sort_by_key(|row| row.customer_id),
        }
        log::debug!("engine: {} produced {} rows", self.rfm.name(), rfm.len());

        let diversity = self.diversity.segment(&snapshot)?;
        log::debug!("engine: {} produced {} rows", self.diversity.name(), diversity.len());

        let report = SegmentationReport {
            reference_date:       snapshot.reference_date,
            line_items:           items.len() as u64,
            segment_distribution: segment_distribution(&rfm),
            tier_distribution:    tier_distribution(&diversity),
            rfm,
            diversity,
        };

        match report.reference_date {
            Some(date) => log::info!(
                "segmentation: {} line items, {} customers, reference date {date}",
                report.line_items,
                report.customer_count(),
            ),
            None => log::info!("segmentation: empty input, nothing to segment"),
        }

        Ok(report)
    }
}
