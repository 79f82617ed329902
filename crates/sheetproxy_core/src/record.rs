//! Flattened output rows.

use crate::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One data row keyed by column label, in column order.
///
/// Serializes as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Scalar>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`. A repeated label keeps its first position and
    /// takes the newer value.
    pub fn insert(&mut self, label: impl Into<String>, value: Scalar) {
        self.0.insert(label.into(), value);
    }

    /// Value stored under `label`.
    pub fn get(&self, label: &str) -> Option<&Scalar> {
        self.0.get(label)
    }

    /// Labels in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Scalar)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Scalar)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

/// All data rows of a sheet, in sheet order. This is what gets cached and
/// served.
pub type FormattedResult = Vec<Record>;
