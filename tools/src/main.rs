//! segment-runner: headless RFM and product-diversity segmentation.
//!
//! Usage:
//!   segment-runner --db retail_analysis.db
//!   segment-runner --db retail_analysis.db --config data/segmentation.json --json-out report.json
//!   segment-runner --db retail_analysis.db --write-back

use anyhow::{bail, Context, Result};
use rfm_core::{
    config::SegmentationConfig,
    engine::SegmentationEngine,
    report::SegmentationReport,
    store::SegStore,
};
use std::env;

#[derive(serde::Serialize)]
struct Export<'a> {
    version: &'static str,
    db:      &'a str,
    report:  &'a SegmentationReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or("retail_analysis.db");
    let config_path = flag_value(&args, "--config");
    let json_out = flag_value(&args, "--json-out");
    let write_back = args.iter().any(|a| a == "--write-back");

    let config = match config_path {
        Some(path) => SegmentationConfig::load(path)?,
        None => SegmentationConfig::default(),
    };

    println!("segment-runner");
    println!("  db:         {db}");
    println!("  config:     {}", config_path.unwrap_or("(defaults)"));
    println!("  tie break:  {:?}", config.tie_break);
    println!();

    let store = SegStore::open_existing(db)
        .with_context(|| format!("opening {db} (the database must already exist)"))?;
    if !store.has_table("sales_transaction")? {
        bail!("{db} has no sales_transaction table");
    }
    let items = store
        .load_line_items()
        .with_context(|| format!("loading line items from {db}"))?;

    let engine = SegmentationEngine::new(config);
    let report = engine.run(&items)?;

    print_summary(&report, engine.config.report.preview_rows);

    if let Some(path) = json_out {
        let export = Export {
            version: env!("CARGO_PKG_VERSION"),
            db,
            report: &report,
        };
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json).with_context(|| format!("writing {path}"))?;
        log::info!("report written to {path}");
    }

    if write_back {
        store.migrate_results()?;
        store.replace_customer_segments(&report.rfm)?;
        store.replace_product_diversity(&report.diversity)?;
        println!();
        println!(
            "wrote {} customer_segment and {} product_diversity rows",
            store.customer_segment_count()?,
            store.product_diversity_count()?,
        );
    }

    Ok(())
}

fn print_summary(report: &SegmentationReport, preview_rows: usize) {
    println!("=== RUN SUMMARY ===");
    println!("  line items:     {}", report.line_items);
    println!("  customers:      {}", report.customer_count());
    match report.reference_date {
        Some(date) => println!("  reference date: {date}"),
        None => {
            println!("  (no transactions; nothing to segment)");
            return;
        }
    }

    println!();
    println!("=== CUSTOMER SEGMENTS ===");
    for entry in &report.segment_distribution {
        println!("  {:<22} {:>6}", entry.segment.label(), entry.count);
    }

    println!();
    println!("=== PRODUCT VARIETY TIERS ===");
    for entry in &report.tier_distribution {
        println!("  {:<38} {:>6}", entry.tier.label(), entry.count);
    }

    println!();
    println!("=== RFM (first {preview_rows}) ===");
    println!(
        "  {:>10} {:>8} {:>6} {:>12}  RFM  segment",
        "customer", "recency", "freq", "monetary"
    );
    for row in report.rfm.iter().take(preview_rows) {
        println!(
            "  {:>10} {:>8} {:>6} {:>12.2}  {}  {}",
            row.customer_id,
            row.recency_days,
            row.frequency,
            row.monetary,
            row.score_string,
            row.segment,
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
