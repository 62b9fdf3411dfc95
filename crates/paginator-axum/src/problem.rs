//! RFC 7807 problem details for pagination failures

use std::collections::BTreeMap;

use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use paginator::PaginateError;
use serde_json::Value;
use tracing::error;

use crate::params::ParamError;

/// A problem response: status code plus a JSON body of problem members
#[derive(Debug, Clone)]
pub struct Problem {
    pub status_code: StatusCode,
    pub body: BTreeMap<String, Value>,
}

impl Problem {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: BTreeMap::new(),
        }
    }

    /// Specify the "type" URI reference identifying the problem
    pub fn with_type(self, value: impl Into<String>) -> Self {
        self.with_value("type", value.into())
    }

    pub fn with_title(self, value: impl Into<String>) -> Self {
        self.with_value("title", value.into())
    }

    pub fn with_detail(self, value: impl Into<String>) -> Self {
        self.with_value("detail", value.into())
    }

    /// Add an extension member to the body
    pub fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_owned(), value.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        if self.body.is_empty() {
            return self.status_code.into_response();
        }

        let mut response = (self.status_code, Json(self.body)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<ParamError> for Problem {
    fn from(err: ParamError) -> Self {
        let ParamError::InvalidInteger { name, value } = &err;

        Problem::new(StatusCode::BAD_REQUEST)
            .with_type("/probs/invalid-pagination-parameter")
            .with_title("Invalid Pagination Parameter")
            .with_detail(err.to_string())
            .with_value("parameter", *name)
            .with_value("value", value.as_str())
    }
}

impl From<PaginateError> for Problem {
    fn from(err: PaginateError) -> Self {
        match err {
            PaginateError::InvalidLimit(limit) => Problem::new(StatusCode::BAD_REQUEST)
                .with_type("/probs/invalid-pagination-parameter")
                .with_title("Invalid Pagination Parameter")
                .with_detail(err.to_string())
                .with_value("parameter", "limit")
                .with_value("value", limit),
            PaginateError::PageOutOfRange { page, .. } => Problem::new(StatusCode::BAD_REQUEST)
                .with_type("/probs/invalid-pagination-parameter")
                .with_title("Invalid Pagination Parameter")
                .with_detail(err.to_string())
                .with_value("parameter", "page")
                .with_value("value", page),
            PaginateError::Timeout(ms) => Problem::new(StatusCode::GATEWAY_TIMEOUT)
                .with_type("/probs/query-timeout")
                .with_title("Query Timeout")
                .with_detail(format!("The page could not be loaded within {}ms", ms)),
            err => {
                let code = match &err {
                    PaginateError::Query(_) => "QUERY_FAILED",
                    PaginateError::Decode(_) => "DECODE_FAILED",
                    PaginateError::Stream(_) => "STREAM_FAILED",
                    PaginateError::Count(_) => "COUNT_FAILED",
                    _ => "TRANSACTION_FAILED",
                };
                error!("Paginated query failed ({}): {}", code, err);

                Problem::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_type("/probs/internal-server-error")
                    .with_title("Internal Server Error")
                    .with_detail("An unexpected error occurred while loading the page")
                    .with_value("error_code", code)
            }
        }
    }
}
