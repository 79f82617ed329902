//! Upstream table model.

use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A raw cell value as the upstream reports it.
///
/// Deserialization tries the variants in order, so JSON `null` becomes
/// [`Scalar::Null`] and anything that is not a scalar (time-of-day arrays,
/// for instance) is kept verbatim in [`Scalar::Composite`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Empty value
    #[default]
    Null,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell, kept with its original precision
    Number(serde_json::Number),
    /// Text cell (dates arrive as `Date(...)` text too)
    Text(String),
    /// Non-scalar value passed through untouched
    Composite(serde_json::Value),
}

impl Scalar {
    /// Render the value as a column label.
    pub fn to_label(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => integral(n).to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Composite(v) => v.to_string(),
        }
    }
}

/// The upstream reports every number as a float (`1.0`); whole values are
/// written back as integers so the response reads `1`.
fn integral(n: &serde_json::Number) -> serde_json::Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            serde_json::Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

/// One non-empty cell.
///
/// `v` and `f` are both optional upstream. A missing `v` is `None`; an
/// explicit `"v": null` is `Some(Scalar::Null)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Cell {
    /// Raw value
    #[serde(
        rename = "v",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    value: Option<Scalar>,
    /// Display string, e.g. `"$1,000.00"` for the number 1000
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Some)
}

impl Cell {
    /// Create a cell holding only a raw value.
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: Some(value.into()),
            formatted: None,
        }
    }

    /// Attach a display string.
    pub fn with_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.formatted = Some(formatted.into());
        self
    }

    /// The value a data row exposes for this cell: the raw value when the
    /// cell has a `v` (even a null one), otherwise its display string,
    /// otherwise null.
    pub fn primary_value(&self) -> Scalar {
        match (&self.value, &self.formatted) {
            (Some(Scalar::Number(n)), _) => Scalar::Number(integral(n)),
            (Some(value), _) => value.clone(),
            (None, Some(formatted)) => Scalar::Text(formatted.clone()),
            (None, None) => Scalar::Null,
        }
    }

    /// The label a header row cell yields. Only the raw value counts here;
    /// the display string is ignored and a null value yields no label.
    pub fn header_label(&self) -> Option<String> {
        match &self.value {
            None | Some(Scalar::Null) => None,
            Some(value) => Some(value.to_label()),
        }
    }
}

/// Column definition. Only the label is used; `id`, `type` and `pattern`
/// are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Column {
    #[serde(default)]
    label: String,
}

impl Column {
    /// Create a column with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// One table row; `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Row {
    #[serde(rename = "c")]
    cells: Vec<Option<Cell>>,
}

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<Option<Cell>>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, `None` when empty or past the end of the row.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).and_then(Option::as_ref)
    }
}

/// The `table` object of a Google Visualization query response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TabularPayload {
    cols: Vec<Column>,
    rows: Vec<Row>,
    /// Number of leading rows the upstream already recognised as headers
    #[serde(default)]
    parsed_num_headers: u32,
}

impl TabularPayload {
    /// Create a payload from its parts.
    pub fn new(cols: Vec<Column>, rows: Vec<Row>, parsed_num_headers: u32) -> Self {
        Self {
            cols,
            rows,
            parsed_num_headers,
        }
    }

    /// Whether the column labels are already usable as headers.
    pub fn has_parsed_headers(&self) -> bool {
        self.parsed_num_headers > 0
    }
}
