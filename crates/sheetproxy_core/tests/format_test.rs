//! Tests for flattening Google Visualization tables into records.

use sheetproxy_core::{format, Scalar, TabularPayload};

fn payload(json: &str) -> TabularPayload {
    serde_json::from_str(json).expect("valid test payload")
}

#[test]
fn test_parsed_headers_keep_every_row() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [
                {"id": "A", "label": "Name", "type": "string"},
                {"id": "B", "label": "Active", "type": "boolean"}
            ],
            "rows": [
                {"c": [{"v": "Alice"}, {"v": true}]},
                {"c": [{"v": "Bob"}, null]}
            ],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(records.len(), payload.rows().len());
    for record in &records {
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["Name", "Active"]);
    }
    assert_eq!(
        serde_json::to_string(&records)?,
        r#"[{"Name":"Alice","Active":true},{"Name":"Bob","Active":null}]"#
    );
    Ok(())
}

#[test]
fn test_header_row_consumed_when_not_parsed() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"id": "A", "label": ""}, {"id": "B", "label": ""}],
            "rows": [
                {"c": [{"v": "Feature"}, {"v": "Rollout"}]},
                {"c": [{"v": "search"}, {"v": 0.5, "f": "50%"}]},
                {"c": [{"v": "export"}, {"v": 1, "f": "100%"}]}
            ],
            "parsedNumHeaders": 0
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(records.len(), payload.rows().len() - 1);
    assert_eq!(records[0].get("Feature"), Some(&Scalar::Text("search".into())));
    assert_eq!(records[0].get("Rollout"), Some(&Scalar::from(0.5)));
    assert_eq!(records[1].get("Rollout"), Some(&Scalar::from(1_i64)));
    Ok(())
}

#[test]
fn test_numeric_header_label_uses_raw_value() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": ""}],
            "rows": [
                {"c": [{"v": 2024, "f": "2,024"}]},
                {"c": [{"v": "q1"}]}
            ]
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(records[0].labels().collect::<Vec<_>>(), vec!["2024"]);
    Ok(())
}

#[test]
fn test_format_is_idempotent() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "k"}, {"label": "v"}],
            "rows": [{"c": [{"v": "a"}, {"v": 1}]}, {"c": [null, {"v": "b"}]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let first = format(&payload)?;
    let second = format(&payload)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_null_cell_maps_to_null_not_missing() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "a"}, {"label": "b"}, {"label": "c"}],
            "rows": [{"c": [{"v": 1}, null, {"v": 3}]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(records[0].len(), 3);
    assert_eq!(records[0].get("b"), Some(&Scalar::Null));
    Ok(())
}

#[test]
fn test_zero_data_rows_yields_empty_result() -> anyhow::Result<()> {
    let parsed = payload(r#"{"cols": [{"label": "a"}], "rows": [], "parsedNumHeaders": 1}"#);
    assert!(format(&parsed)?.is_empty());

    let header_only = payload(r#"{"cols": [{"label": ""}], "rows": [{"c": [{"v": "a"}]}]}"#);
    assert!(format(&header_only)?.is_empty());
    Ok(())
}

#[test]
fn test_zero_columns_yields_empty_records() -> anyhow::Result<()> {
    let payload = payload(
        r#"{"cols": [], "rows": [{"c": []}, {"c": []}], "parsedNumHeaders": 1}"#,
    );

    let records = format(&payload)?;

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.is_empty()));
    assert_eq!(serde_json::to_string(&records)?, "[{},{}]");
    Ok(())
}

#[test]
fn test_duplicate_labels_keep_first_position_last_value() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "x"}, {"label": "y"}, {"label": "x"}],
            "rows": [{"c": [{"v": 1}, {"v": 2}, {"v": 3}]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(serde_json::to_string(&records)?, r#"[{"x":3,"y":2}]"#);
    Ok(())
}

#[test]
fn test_formatted_result_round_trips_through_json() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "Name"}, {"label": "Active"}],
            "rows": [{"c": [{"v": "Alice"}, {"v": true}]}, {"c": [{"v": "Bob"}, null]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;
    let text = serde_json::to_string(&records)?;
    let restored: Vec<sheetproxy_core::Record> = serde_json::from_str(&text)?;

    assert_eq!(restored, records);
    Ok(())
}

#[test]
fn test_explicit_null_value_wins_over_formatted() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "A"}, {"label": "B"}],
            "rows": [{"c": [{"v": null, "f": "x"}, {"f": "only shown"}]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(
        serde_json::to_string(&records)?,
        r#"[{"A":null,"B":"only shown"}]"#
    );
    Ok(())
}

#[test]
fn test_whole_numbers_serialize_without_fraction() -> anyhow::Result<()> {
    let payload = payload(
        r#"{
            "cols": [{"label": "Count"}, {"label": "Share"}],
            "rows": [{"c": [{"v": 1.0, "f": "1"}, {"v": 0.25}]}],
            "parsedNumHeaders": 1
        }"#,
    );

    let records = format(&payload)?;

    assert_eq!(
        serde_json::to_string(&records)?,
        r#"[{"Count":1,"Share":0.25}]"#
    );
    Ok(())
}
