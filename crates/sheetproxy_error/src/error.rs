//! Top-level error wrapper types.

use crate::{
    BuilderError, CacheError, CacheErrorKind, ConfigError, FetchError, MethodError, ParseError,
    PayloadError,
};

/// Every failure the proxy pipeline can produce.
///
/// # Examples
///
/// ```
/// use sheetproxy_error::{ParseError, SheetProxyError, SheetProxyErrorKind};
///
/// let err: SheetProxyError = ParseError::new("missing callback wrapper").into();
/// assert!(matches!(err.kind(), SheetProxyErrorKind::Parse(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SheetProxyErrorKind {
    /// Request used a method other than GET
    #[from(MethodError)]
    Method(MethodError),
    /// Upstream unreachable or returned a non-success status
    #[from(FetchError)]
    Fetch(FetchError),
    /// Upstream body was not the expected wrapped JSON
    #[from(ParseError)]
    Parse(ParseError),
    /// Parsed document lacks the expected table structure
    #[from(PayloadError)]
    Payload(PayloadError),
    /// Cache store read or write failed
    #[from(CacheError)]
    Cache(CacheError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// sheetproxy error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sheetproxy_error::{ConfigError, SheetProxyResult};
///
/// fn load() -> SheetProxyResult<()> {
///     Err(ConfigError::new("document_id must not be empty"))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("SheetProxy Error: {}", _0)]
pub struct SheetProxyError(Box<SheetProxyErrorKind>);

impl SheetProxyError {
    /// Create a new error from a kind.
    pub fn new(kind: SheetProxyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SheetProxyErrorKind {
        &self.0
    }

    /// Whether the cache store itself failed. Serialization failures are
    /// raised before the store is touched and do not count.
    pub fn is_cache_unavailable(&self) -> bool {
        matches!(
            self.kind(),
            SheetProxyErrorKind::Cache(CacheError {
                kind: CacheErrorKind::Unavailable(_),
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to SheetProxyErrorKind
impl<T> From<T> for SheetProxyError
where
    T: Into<SheetProxyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for sheetproxy operations.
pub type SheetProxyResult<T> = std::result::Result<T, SheetProxyError>;
