//! Cache store errors.

/// Kinds of cache errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Store could not be reached or refused the operation
    #[display("Cache unavailable: {}", _0)]
    Unavailable(String),
    /// Value could not be serialized for storage
    #[display("Failed to serialize cache value: {}", _0)]
    Serialization(String),
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use sheetproxy_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::Unavailable("connection reset".to_string()));
/// assert!(format!("{}", err).contains("Cache unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
