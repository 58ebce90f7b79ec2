//! Shared primitive types used across the segmentation core.

/// Customer foreign key as carried by the sales data.
pub type CustomerId = i64;

/// Product foreign key as carried by the sales data.
pub type ProductId = i64;

/// Transaction identifier. One transaction may span several line items.
pub type TransactionId = i64;

/// Ordinal score assigned by a quantile ranker (1 = lowest group).
pub type Score = u8;
