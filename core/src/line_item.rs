//! Sales line items — the only input the segmentation core consumes.
//!
//! RULE: The core never cleans data. Quantities and prices are taken as-is;
//! only absent fields are rejected. Deduplication and price reconciliation
//! belong to whoever produced the rows.

use crate::{
    error::{SegError, SegResult},
    types::{CustomerId, ProductId, TransactionId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product-quantity-price row within a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub transaction_id: TransactionId,
    pub customer_id:    CustomerId,
    pub product_id:     ProductId,
    pub quantity:       i64,
    pub unit_price:     f64,
    pub date:           NaiveDate,
}

impl LineItem {
    /// quantity × unit price for this row.
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// A line item as it arrives from an external source, before the
/// required-field check. The date is still text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub transaction_id: Option<TransactionId>,
    pub customer_id:    Option<CustomerId>,
    pub product_id:     Option<ProductId>,
    pub quantity:       Option<i64>,
    pub unit_price:     Option<f64>,
    pub date:           Option<String>,
}

impl RawLineItem {
    /// Check that every required field is present and the date parses.
    /// `row` only labels the error.
    pub fn validate(self, row: usize) -> SegResult<LineItem> {
        let transaction_id = require(self.transaction_id, row, "transaction_id")?;
        let customer_id = require(self.customer_id, row, "customer_id")?;
        let product_id = require(self.product_id, row, "product_id")?;
        let quantity = require(self.quantity, row, "quantity")?;
        let unit_price = require(self.unit_price, row, "unit_price")?;
        let date_text = require(self.date, row, "date")?;
        let date = parse_date(&date_text)
            .ok_or_else(|| SegError::InvalidDate { row, value: date_text })?;

        Ok(LineItem {
            transaction_id,
            customer_id,
            product_id,
            quantity,
            unit_price,
            date,
        })
    }
}

/// Validate a whole batch, failing on the first bad row.
pub fn validate_all(raw: Vec<RawLineItem>) -> SegResult<Vec<LineItem>> {
    raw.into_iter()
        .enumerate()
        .map(|(row, item)| item.validate(row))
        .collect()
}

fn require<T>(value: Option<T>, row: usize, field: &'static str) -> SegResult<T> {
    value.ok_or(SegError::MissingField { row, field })
}

/// Accepts `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM:SS` with the time dropped.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.date())
        })
        .ok()
}
