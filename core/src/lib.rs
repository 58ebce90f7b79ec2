//! rfm-core: customer value segmentation over cleaned retail sales data.
//!
//! Two independent pipelines run over the same line-item snapshot:
//!   - RFM: recency / frequency / monetary quintile scores and a named segment
//!   - Diversity: line-item volume quartiles and a variety tier

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod diversity;
pub mod engine;
pub mod error;
pub mod line_item;
pub mod ntile;
pub mod report;
pub mod scorer;
pub mod segmenter;
pub mod store;
pub mod types;
