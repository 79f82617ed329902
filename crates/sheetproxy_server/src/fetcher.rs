//! Upstream sheet retrieval.

use crate::ProxyConfig;
use serde_json::Value;
use sheetproxy_core::TabularPayload;
use sheetproxy_error::{
    FetchError, FetchErrorKind, ParseError, PayloadError, PayloadErrorKind, SheetProxyResult,
};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Callback invocation the JSON document is wrapped in. It is preceded by an
/// opaque comment token (`/*O_o*/`) and followed by `);`.
const CALLBACK_PREFIX: &str = "google.visualization.Query.setResponse(";

/// Source of the raw sheet table.
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Retrieve the current table.
    async fn fetch_sheet(&self) -> SheetProxyResult<TabularPayload>;
}

/// Fetches the sheet from the Google Visualization query endpoint.
#[derive(Debug, Clone)]
pub struct SheetFetcher {
    url: String,
    client: reqwest::Client,
}

impl SheetFetcher {
    /// Create a fetcher for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP client cannot be constructed.
    #[instrument(skip(url), fields(url = %url.as_ref()))]
    pub fn new(url: impl AsRef<str>, timeout: Duration) -> SheetProxyResult<Self> {
        debug!("Creating sheet fetcher");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                FetchError::new(FetchErrorKind::Request(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self {
            url: url.as_ref().to_string(),
            client,
        })
    }

    /// Create a fetcher for the sheet named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &ProxyConfig) -> SheetProxyResult<Self> {
        Self::new(config.sheet_url(), config.request_timeout())
    }

    /// URL requested on every fetch.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl SheetSource for SheetFetcher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_sheet(&self) -> SheetProxyResult<TabularPayload> {
        debug!("Requesting sheet from upstream");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Upstream request failed: {}", e);
                FetchError::new(FetchErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Upstream returned error status");
            return Err(FetchError::new(FetchErrorKind::Status(status.as_u16())).into());
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read upstream body: {}", e);
            FetchError::new(FetchErrorKind::Body(e.to_string()))
        })?;

        debug!(bytes = body.len(), "Received upstream body");
        parse_response(&body)
    }
}

/// Strip the callback wrapper from an upstream body, leaving the JSON text.
///
/// ```
/// use sheetproxy_server::unwrap_callback;
///
/// let body = "/*O_o*/\ngoogle.visualization.Query.setResponse({\"table\":{}});";
/// assert_eq!(unwrap_callback(body).unwrap(), "{\"table\":{}}");
/// ```
///
/// # Errors
///
/// Returns [`ParseError`] when the invocation text or the closing
/// parenthesis is missing.
pub fn unwrap_callback(body: &str) -> Result<&str, ParseError> {
    let start = body
        .find(CALLBACK_PREFIX)
        .ok_or_else(|| ParseError::new("Response is not wrapped in a setResponse callback"))?
        + CALLBACK_PREFIX.len();

    let rest = body[start..].trim_end();
    let rest = rest.strip_suffix(';').unwrap_or(rest);
    rest.strip_suffix(')')
        .ok_or_else(|| ParseError::new("Callback invocation is not closed"))
}

/// Parse an upstream body into the table it carries.
///
/// # Errors
///
/// - [`ParseError`] if the body is not callback-wrapped JSON
/// - [`FetchError`] with [`FetchErrorKind::Upstream`] if the document reports a query error
/// - [`PayloadError`] if the document has no usable `table`
pub fn parse_response(body: &str) -> SheetProxyResult<TabularPayload> {
    let json = unwrap_callback(body)?;
    let mut document: Value = serde_json::from_str(json)
        .map_err(|e| ParseError::new(format!("Invalid JSON in response: {}", e)))?;

    if document.get("status").and_then(Value::as_str) == Some("error") {
        let messages = upstream_errors(&document);
        error!(errors = %messages, "Upstream query reported an error");
        return Err(FetchError::new(FetchErrorKind::Upstream(messages)).into());
    }

    let table = document
        .get_mut("table")
        .map(Value::take)
        .ok_or_else(|| PayloadError::new(PayloadErrorKind::MissingTable))?;

    let payload = serde_json::from_value(table)
        .map_err(|e| PayloadError::new(PayloadErrorKind::Malformed(e.to_string())))?;
    Ok(payload)
}

fn upstream_errors(document: &Value) -> String {
    let messages: Vec<&str> = document
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    e.get("detailed_message")
                        .or_else(|| e.get("message"))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        "unknown error".to_string()
    } else {
        messages.join("; ")
    }
}
