//! Error types for sheetproxy.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use sheetproxy_error::{FetchError, FetchErrorKind, SheetProxyResult};
//!
//! fn fetch_sheet() -> SheetProxyResult<String> {
//!     Err(FetchError::new(FetchErrorKind::Status(503)))?
//! }
//!
//! assert!(fetch_sheet().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod cache;
mod config;
mod error;
mod fetch;
mod method;
mod parse;
mod payload;

pub use builder::{BuilderError, BuilderErrorKind};
pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use error::{SheetProxyError, SheetProxyErrorKind, SheetProxyResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use method::MethodError;
pub use parse::ParseError;
pub use payload::{PayloadError, PayloadErrorKind};
