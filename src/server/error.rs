//! Failure payload returned by the introduction endpoint.
//!
//! The web front-end tells success and failure apart by content type: a
//! description comes back as `text/plain`, a failure as this JSON object.
//! Both use HTTP 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Numeric code carried in every failure payload.
pub const FAILURE_CODE: u16 = 400;

/// Wrapper so we can implement `IntoResponse` for the library error.
pub struct ApiFailure {
    inner: crate::Error,
}

impl ApiFailure {
    pub fn new(inner: crate::Error) -> Self {
        Self { inner }
    }

    /// Human-readable message embedding the failure reason.
    pub fn message(&self) -> String {
        format!("获取失败,原因：{}", self.inner.user_message())
    }
}

impl From<crate::Error> for ApiFailure {
    fn from(e: crate::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        tracing::info!(
            code = self.inner.code(),
            error = %self.inner,
            "Introduction request failed"
        );

        let body = json!({
            "code": FAILURE_CODE,
            "message": self.message(),
            "data": null,
        });

        (StatusCode::OK, axum::Json(body)).into_response()
    }
}
