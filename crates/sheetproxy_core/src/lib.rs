//! Tabular payload model and record formatting for sheetproxy.
//!
//! The Google Visualization query endpoint returns a table as column
//! definitions plus rows of cells. [`format`] flattens that into one
//! [`Record`] per data row, keyed by column label.
//!
//! ```
//! use sheetproxy_core::{format, TabularPayload};
//!
//! let payload: TabularPayload = serde_json::from_str(r#"{
//!     "cols": [{"label": "Name"}, {"label": "Active"}],
//!     "rows": [{"c": [{"v": "Alice"}, {"v": true}]}],
//!     "parsedNumHeaders": 1
//! }"#)?;
//!
//! let records = format(&payload)?;
//! assert_eq!(
//!     serde_json::to_string(&records)?,
//!     r#"[{"Name":"Alice","Active":true}]"#
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod format;
mod payload;
mod record;

pub use format::format;
pub use payload::{Cell, Column, Row, Scalar, TabularPayload};
pub use record::{FormattedResult, Record};
