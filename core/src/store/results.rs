use super::SegStore;
use crate::{
    classifier::CustomerSegment,
    diversity::ProductDiversity,
    error::SegResult,
    types::CustomerId,
};
use rusqlite::{params, OptionalExtension};

impl SegStore {
    // ── RFM segments ──────────────────────────────────────────────

    /// Replace the whole customer_segment table with `rows`.
    pub fn replace_customer_segments(&self, rows: &[CustomerSegment]) -> SegResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM customer_segment", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO customer_segment (
                    CustomerID, RecencyInDays, Frequency, MonetaryValue,
                    R_Score, F_Score, M_Score, RFM_Score_String, CustomerSegment, MatchedRule
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.customer_id,
                    row.recency_days as i64,
                    row.frequency as i64,
                    row.monetary,
                    row.r_score,
                    row.f_score,
                    row.m_score,
                    &row.score_string,
                    row.segment.label(),
                    row.matched_rule,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("store: wrote {} customer_segment rows", rows.len());
        Ok(())
    }

    pub fn customer_segment_count(&self) -> SegResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM customer_segment", [], |r| r.get(0))?;
        Ok(n)
    }

    /// Stored segment label for one customer, if any.
    pub fn segment_label(&self, customer_id: CustomerId) -> SegResult<Option<String>> {
        let label = self
            .conn
            .query_row(
                "SELECT CustomerSegment FROM customer_segment WHERE CustomerID = ?1",
                params![customer_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(label)
    }

    // ── Product diversity ─────────────────────────────────────────

    /// Replace the whole product_diversity table with `rows`.
    pub fn replace_product_diversity(&self, rows: &[ProductDiversity]) -> SegResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM product_diversity", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO product_diversity (
                    CustomerID, NumberOfUniqueProductsOrdered, Quartile, ProductVarietySegment
                ) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.customer_id,
                    row.line_item_count as i64,
                    row.quartile,
                    row.tier.label(),
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("store: wrote {} product_diversity rows", rows.len());
        Ok(())
    }

    pub fn product_diversity_count(&self) -> SegResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM product_diversity", [], |r| r.get(0))?;
        Ok(n)
    }

    /// Stored diversity tier label for one customer, if any.
    pub fn diversity_label(&self, customer_id: CustomerId) -> SegResult<Option<String>> {
        let label = self
            .conn
            .query_row(
                "SELECT ProductVarietySegment FROM product_diversity WHERE CustomerID = ?1",
                params![customer_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(label)
    }
}
