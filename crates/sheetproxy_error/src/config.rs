//! Configuration loading errors.

/// Configuration could not be read, parsed or validated.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetproxy_error::ConfigError;
    ///
    /// let err = ConfigError::new("sheet_name must not be empty");
    /// assert!(err.message.contains("sheet_name"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
