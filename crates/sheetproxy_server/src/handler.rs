//! HTTP surface.

use crate::SheetService;
use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use sheetproxy_error::{MethodError, SheetProxyError, SheetProxyErrorKind};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Body of the 405 response.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Unallowed HTTP method! Use GET method instead.";

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Build the router. Every path is answered by the sheet handler.
pub fn create_router(service: Arc<SheetService>) -> Router {
    Router::new()
        .route("/", any(serve_sheet))
        .fallback(serve_sheet)
        .with_state(service)
}

async fn serve_sheet(
    State(service): State<Arc<SheetService>>,
    method: Method,
) -> Result<Response, ApiError> {
    if method != Method::GET {
        return Err(MethodError::new(method.as_str()).into());
    }

    let started = Instant::now();
    let body = service.sheet_json().await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(document_id = service.document_id(), elapsed_ms, "Call took {} ms", elapsed_ms);

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Error returned from the handler, rendered as a plain-text response.
///
/// A rejected method becomes `405` with [`METHOD_NOT_ALLOWED_MESSAGE`];
/// anything else is logged and becomes a generic `500`.
#[derive(Debug)]
pub struct ApiError(SheetProxyError);

impl ApiError {
    /// The wrapped error.
    pub fn inner(&self) -> &SheetProxyError {
        &self.0
    }
}

impl<E> From<E> for ApiError
where
    E: Into<SheetProxyError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.kind() {
            SheetProxyErrorKind::Method(e) => {
                warn!(method = %e.method, "Rejected request method");
                (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
            }
            _ => {
                error!(error = %self.0, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };
        (status, [(header::CONTENT_TYPE, "text/plain")], message).into_response()
    }
}
