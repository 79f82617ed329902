//! Tabular payload shape errors.

/// Kinds of payload shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PayloadErrorKind {
    /// The parsed document has no `table` field
    #[display("Document has no table field")]
    MissingTable,
    /// The `table` field does not have the cols/rows shape
    #[display("Malformed table: {}", _0)]
    Malformed(String),
    /// Headers must come from the first row but there are no rows
    #[display("No header row available")]
    MissingHeaderRow,
    /// A header cell is empty so no label can be derived
    #[display("Header cell {} is empty", _0)]
    EmptyHeaderCell(usize),
}

/// Payload error with location tracking.
///
/// # Examples
///
/// ```
/// use sheetproxy_error::{PayloadError, PayloadErrorKind};
///
/// let err = PayloadError::new(PayloadErrorKind::MissingTable);
/// assert_eq!(err.kind, PayloadErrorKind::MissingTable);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Payload Error: {} at line {} in {}", kind, line, file)]
pub struct PayloadError {
    /// The kind of error that occurred
    pub kind: PayloadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PayloadError {
    /// Create a new payload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PayloadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
