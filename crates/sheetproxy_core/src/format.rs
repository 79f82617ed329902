//! Table to record conversion.

use crate::{FormattedResult, Record, Row, Scalar, TabularPayload};
use sheetproxy_error::{PayloadError, PayloadErrorKind};
use tracing::{debug, instrument};

/// Flatten a tabular payload into one [`Record`] per data row.
///
/// Labels come from the column definitions when the upstream parsed the
/// header row itself (`parsedNumHeaders > 0`). Otherwise the first row is
/// taken as the header: each of its cells contributes its raw value as a
/// label, and that row is left out of the output.
///
/// Every record holds exactly one key per label. Empty cells and cells
/// missing from short rows map to `null`.
///
/// # Errors
///
/// Returns [`PayloadError`] when headers must come from the first row but
/// there is no row, or one of its cells is empty.
#[instrument(
    skip(payload),
    fields(
        cols = payload.cols().len(),
        rows = payload.rows().len(),
        parsed_headers = payload.has_parsed_headers()
    )
)]
pub fn format(payload: &TabularPayload) -> Result<FormattedResult, PayloadError> {
    let (labels, data_rows) = if payload.has_parsed_headers() {
        let labels: Vec<String> = payload.cols().iter().map(|col| col.label().clone()).collect();
        (labels, payload.rows().as_slice())
    } else {
        let (header, rest) = payload
            .rows()
            .split_first()
            .ok_or_else(|| PayloadError::new(PayloadErrorKind::MissingHeaderRow))?;
        (header_labels(header)?, rest)
    };

    debug!(labels = ?labels, "Resolved column labels");

    let records: FormattedResult = data_rows
        .iter()
        .map(|row| to_record(&labels, row))
        .collect();

    debug!(records = records.len(), "Formatted rows");
    Ok(records)
}

fn header_labels(header: &Row) -> Result<Vec<String>, PayloadError> {
    header
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            cell.as_ref()
                .and_then(|cell| cell.header_label())
                .ok_or_else(|| PayloadError::new(PayloadErrorKind::EmptyHeaderCell(index)))
        })
        .collect()
}

fn to_record(labels: &[String], row: &Row) -> Record {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let value = row.cell(index).map_or(Scalar::Null, |cell| cell.primary_value());
            (label.as_str(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Column};

    fn text(s: &str) -> Option<Cell> {
        Some(Cell::new(s))
    }

    #[test]
    fn test_parsed_headers_use_column_labels() {
        let payload = TabularPayload::new(
            vec![Column::new("Name"), Column::new("Active")],
            vec![Row::new(vec![text("Alice"), Some(Cell::new(true))])],
            1,
        );

        let records = format(&payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].labels().collect::<Vec<_>>(), vec!["Name", "Active"]);
        assert_eq!(records[0].get("Active"), Some(&Scalar::Bool(true)));
    }

    #[test]
    fn test_first_row_becomes_header() {
        let payload = TabularPayload::new(
            vec![Column::new(""), Column::new("")],
            vec![
                Row::new(vec![text("Flag"), text("Enabled")]),
                Row::new(vec![text("dark_mode"), Some(Cell::new(false))]),
            ],
            0,
        );

        let records = format(&payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Flag"), Some(&Scalar::Text("dark_mode".into())));
        assert_eq!(records[0].get("Enabled"), Some(&Scalar::Bool(false)));
    }

    #[test]
    fn test_short_row_pads_with_null() {
        let payload = TabularPayload::new(
            vec![Column::new("a"), Column::new("b"), Column::new("c")],
            vec![Row::new(vec![text("x")])],
            1,
        );

        let records = format(&payload).unwrap();
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].get("b"), Some(&Scalar::Null));
        assert_eq!(records[0].get("c"), Some(&Scalar::Null));
    }

    #[test]
    fn test_extra_cells_ignored() {
        let payload = TabularPayload::new(
            vec![Column::new("a")],
            vec![Row::new(vec![text("x"), text("y")])],
            1,
        );

        let records = format(&payload).unwrap();
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_no_rows_without_headers_is_error() {
        let payload = TabularPayload::new(vec![Column::new("a")], vec![], 0);
        let err = format(&payload).unwrap_err();
        assert_eq!(err.kind, PayloadErrorKind::MissingHeaderRow);
    }

    #[test]
    fn test_empty_header_cell_is_error() {
        let payload = TabularPayload::new(
            vec![],
            vec![Row::new(vec![text("a"), None])],
            0,
        );
        let err = format(&payload).unwrap_err();
        assert_eq!(err.kind, PayloadErrorKind::EmptyHeaderCell(1));
    }
}
