//! Upstream fetch errors.

/// Ways the upstream request can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// Transport-level failure (DNS, connect, TLS, timeout)
    #[display("Request failed: {}", _0)]
    Request(String),
    /// Upstream answered with a non-success status code
    #[display("Upstream returned status {}", _0)]
    Status(u16),
    /// Response body could not be read
    #[display("Failed to read response body: {}", _0)]
    Body(String),
    /// Upstream query reported an error document
    #[display("Upstream query error: {}", _0)]
    Upstream(String),
}

/// Upstream fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use sheetproxy_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status(404));
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of failure
    pub kind: FetchErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl FetchError {
    /// Create a new FetchError at the current location.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
