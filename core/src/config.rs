use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Secondary order applied by every ranker when two customers have the
/// same metric value. Rank-based binning may split ties across groups, so
/// this decides which side of a boundary each tied customer lands on.
/// Monetary ties are judged at cent precision, so float summation order
/// never overrides this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    CustomerIdAscending,
    CustomerIdDescending,
}

impl TieBreak {
    pub fn compare(self, a: CustomerId, b: CustomerId) -> Ordering {
        match self {
            TieBreak::CustomerIdAscending  => a.cmp(&b),
            TieBreak::CustomerIdDescending => b.cmp(&a),
        }
    }
}

/// Row order of the RFM result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfmOrder {
    /// Highest spend first, ties by customer id ascending.
    #[default]
    MonetaryDescending,
    CustomerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub rfm_order:    RfmOrder,
    /// RFM rows shown by the runner's console preview.
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rfm_order:    RfmOrder::MonetaryDescending,
            preview_rows: 50,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentationConfig {
    pub tie_break: TieBreak,
    pub report:    ReportConfig,
}

impl SegmentationConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    /// In tests, use SegmentationConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SegmentationConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid segmentation config {path}: {e}"))?;
        Ok(config)
    }
}
