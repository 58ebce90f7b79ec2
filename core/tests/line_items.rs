//! Required-field validation of incoming line items.

use rfm_core::{
    error::SegError,
    line_item::{validate_all, RawLineItem},
};

#[test]
fn complete_rows_validate() {
    let raw: Vec<RawLineItem> = serde_json::from_str(
        r#"[
            {"transaction_id": 1, "customer_id": 4, "product_id": 2,
             "quantity": 3, "unit_price": 1.5, "date": "2024-06-30"},
            {"transaction_id": 2, "customer_id": 4, "product_id": 9,
             "quantity": 0, "unit_price": 0.0, "date": "2024-07-01"}
        ]"#,
    )
    .unwrap();

    let items = validate_all(raw).unwrap();
    assert_eq!(items.len(), 2);
    assert!((items[0].amount() - 4.5).abs() < 1e-9);
    // Zero quantity is implausible but not this layer's concern.
    assert_eq!(items[1].amount(), 0.0);
}

#[test]
fn absent_customer_id_is_named() {
    let raw: Vec<RawLineItem> = serde_json::from_str(
        r#"[{"transaction_id": 1, "product_id": 2, "quantity": 3,
             "unit_price": 1.5, "date": "2024-06-30"}]"#,
    )
    .unwrap();

    let err = validate_all(raw).unwrap_err();
    assert!(
        matches!(err, SegError::MissingField { row: 0, field: "customer_id" }),
        "got {err:?}"
    );
    assert!(err.to_string().contains("customer_id"));
}

#[test]
fn empty_batch_is_fine() {
    assert!(validate_all(Vec::new()).unwrap().is_empty());
}
