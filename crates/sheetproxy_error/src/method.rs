//! Rejected request method.

/// A request arrived with a method other than GET.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Method Error: {} not allowed at line {} in {}", method, line, file)]
pub struct MethodError {
    /// The rejected method name
    pub method: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MethodError {
    /// Create a new MethodError for the given method.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetproxy_error::MethodError;
    ///
    /// let err = MethodError::new("POST");
    /// assert_eq!(err.method, "POST");
    /// ```
    #[track_caller]
    pub fn new(method: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            method: method.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
