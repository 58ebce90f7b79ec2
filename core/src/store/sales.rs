use super::SegStore;
use crate::{
    error::{SegError, SegResult},
    line_item::{validate_all, LineItem, RawLineItem},
};
use rusqlite::{params, types::FromSql, Row};

impl SegStore {
    // ── Sales line items ──────────────────────────────────────────

    pub fn insert_line_item(&self, item: &LineItem) -> SegResult<()> {
        self.insert_raw_line_item(&RawLineItem {
            transaction_id: Some(item.transaction_id),
            customer_id:    Some(item.customer_id),
            product_id:     Some(item.product_id),
            quantity:       Some(item.quantity),
            unit_price:     Some(item.unit_price),
            date:           Some(item.date.format("%Y-%m-%d").to_string()),
        })
    }

    /// Insert a row as-is, absent fields included.
    pub fn insert_raw_line_item(&self, raw: &RawLineItem) -> SegResult<()> {
        self.conn.execute(
            "INSERT INTO sales_transaction (
                TransactionID, CustomerID, ProductID, QuantityPurchased, TransactionDate, Price
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                raw.transaction_id,
                raw.customer_id,
                raw.product_id,
                raw.quantity,
                &raw.date,
                raw.unit_price,
            ],
        )?;
        Ok(())
    }

    /// Every sales row in insertion order, unvalidated.
    /// A value of the wrong type fails with the row index and field.
    pub fn load_raw_line_items(&self) -> SegResult<Vec<RawLineItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT TransactionID, CustomerID, ProductID, QuantityPurchased, TransactionDate, Price
             FROM sales_transaction ORDER BY rowid ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let index = out.len();
            out.push(RawLineItem {
                transaction_id: column(row, 0, index, "transaction_id")?,
                customer_id:    column(row, 1, index, "customer_id")?,
                product_id:     column(row, 2, index, "product_id")?,
                quantity:       column(row, 3, index, "quantity")?,
                date:           column(row, 4, index, "date")?,
                unit_price:     column(row, 5, index, "unit_price")?,
            });
        }
        Ok(out)
    }

    /// Every sales row, validated. Fails on the first row missing a field.
    pub fn load_line_items(&self) -> SegResult<Vec<LineItem>> {
        let raw = self.load_raw_line_items()?;
        let items = validate_all(raw)?;
        log::debug!("store: loaded {} line items", items.len());
        Ok(items)
    }

    pub fn line_item_count(&self) -> SegResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM sales_transaction", [], |r| r.get(0))?;
        Ok(n)
    }
}

fn column<T: FromSql>(row: &Row<'_>, idx: usize, index: usize, field: &'static str) -> SegResult<T> {
    match row.get(idx) {
        Ok(value) => Ok(value),
        Err(e @ rusqlite::Error::InvalidColumnType(..))
        | Err(e @ rusqlite::Error::FromSqlConversionFailure(..))
        | Err(e @ rusqlite::Error::IntegralValueOutOfRange(..)) => Err(SegError::InvalidColumn {
            row: index,
            field,
            detail: e.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
