//! End-to-end engine runs: both pipelines, ordering and distributions.

use chrono::NaiveDate;
use rfm_core::{
    classifier::Segment,
    config::{RfmOrder, SegmentationConfig, TieBreak},
    diversity::DiversityTier,
    engine::SegmentationEngine,
    line_item::LineItem,
    segmenter::{RfmSegmenter, Segmenter, Snapshot},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn item(customer: i64, txn: i64, day: u32, quantity: i64, price: f64) -> LineItem {
    LineItem {
        transaction_id: txn,
        customer_id: customer,
        product_id: txn % 5,
        quantity,
        unit_price: price,
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
    }
}

/// Ten customers; customer `c` buys `c` times, the last time on day `c`,
/// spending `c * 10` per purchase. Higher ids are better on every metric.
fn ladder() -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut txn = 0;
    for c in 1..=10i64 {
        for _ in 0..c {
            txn += 1;
            items.push(item(c, txn, c as u32, 1, c as f64 * 10.0));
        }
    }
    items
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_gives_empty_report() {
    init_logging();
    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&[]).unwrap();

    assert!(report.reference_date.is_none());
    assert!(report.rfm.is_empty());
    assert!(report.diversity.is_empty());
    assert!(report.segment_distribution.is_empty());
    assert!(report.tier_distribution.iter().all(|t| t.count == 0));
}

#[test]
fn ladder_scores_top_customers_as_champions_and_bottom_as_lost() {
    init_logging();
    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&ladder()).unwrap();

    assert_eq!(report.reference_date, NaiveDate::from_ymd_opt(2024, 1, 10));
    assert_eq!(report.customer_count(), 10);

    let row = |id: i64| report.rfm.iter().find(|r| r.customer_id == id).unwrap();
    assert_eq!(row(10).score_string, "555");
    assert_eq!(row(10).segment, Segment::Champions);
    assert_eq!(row(9).segment, Segment::Champions);
    assert_eq!(row(1).score_string, "111");
    assert_eq!(row(1).segment, Segment::LostCustomers);
    assert_eq!(row(1).recency_days, 9);
}

/// Default result order is spend descending.
#[test]
fn rfm_rows_default_to_monetary_descending() {
    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&ladder()).unwrap();

    let spend: Vec<f64> = report.rfm.iter().map(|r| r.monetary).collect();
    assert!(spend.windows(2).all(|w| w[0] >= w[1]), "not descending: {spend:?}");
    assert_eq!(report.rfm[0].customer_id, 10);
}

#[test]
fn rfm_rows_can_be_ordered_by_customer_id() {
    let mut config = SegmentationConfig::default();
    config.report.rfm_order = RfmOrder::CustomerId;
    let report = SegmentationEngine::new(config).run(&ladder()).unwrap();

    let ids: Vec<i64> = report.rfm.iter().map(|r| r.customer_id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
}

#[test]
fn distributions_account_for_every_customer() {
    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&ladder()).unwrap();

    let seg_total: u64 = report.segment_distribution.iter().map(|s| s.count).sum();
    assert_eq!(seg_total, 10);
    let counts: Vec<u64> = report.segment_distribution.iter().map(|s| s.count).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]), "not most-populated first: {counts:?}");
    assert!(report.segment_distribution.iter().all(|s| s.count > 0));

    let tiers: Vec<(DiversityTier, u64)> =
        report.tier_distribution.iter().map(|t| (t.tier, t.count)).collect();
    assert_eq!(
        tiers,
        vec![
            (DiversityTier::High, 3),
            (DiversityTier::MediumHigh, 3),
            (DiversityTier::MediumLow, 2),
            (DiversityTier::Low, 2),
        ]
    );
}

/// Both result sets cover the same customers and join on customer id.
#[test]
fn both_pipelines_cover_the_same_customers() {
    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&ladder()).unwrap();

    let mut rfm_ids: Vec<i64> = report.rfm.iter().map(|r| r.customer_id).collect();
    let mut div_ids: Vec<i64> = report.diversity.iter().map(|r| r.customer_id).collect();
    rfm_ids.sort();
    div_ids.sort();
    assert_eq!(rfm_ids, div_ids);
    assert_eq!(report.line_items, 55);
}

/// The report's reference date is the one recency was measured against.
#[test]
fn snapshot_reference_date_drives_recency_and_report() {
    let items = ladder();
    let snapshot = Snapshot::new(&items);
    assert_eq!(snapshot.reference_date, NaiveDate::from_ymd_opt(2024, 1, 10));

    let engine = SegmentationEngine::new(SegmentationConfig::default());
    let report = engine.run(&items).unwrap();
    assert_eq!(report.reference_date, snapshot.reference_date);

    let rows = RfmSegmenter::new(TieBreak::default()).segment(&snapshot).unwrap();
    let latest = rows.iter().find(|r| r.customer_id == 10).unwrap();
    assert_eq!(latest.recency_days, 0);

    let empty = Snapshot::new(&[]);
    assert!(empty.reference_date.is_none());
    assert!(RfmSegmenter::new(TieBreak::default()).segment(&empty).unwrap().is_empty());
}
