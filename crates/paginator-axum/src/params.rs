//! Page and limit extraction from request query strings

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Uri},
};
use paginator::config::{PaginationConfig, DEFAULT_LIMIT, DEFAULT_PAGE};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use thiserror::Error;
use tracing::debug;
use utoipa::IntoParams;

use crate::problem::Problem;

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Query parameter '{name}' must be an integer, got '{value}'")]
    InvalidInteger { name: &'static str, value: String },
}

/// Read `page` and `limit` from the query string, defaulting to `(1, 10)`.
///
/// Lenient: a parameter that is absent, empty, or not an integer falls back to
/// its default without reporting anything to the client. Parsed values are
/// returned verbatim, zero and negatives included. Use
/// [`try_extract_page_and_limit`] to reject malformed input instead.
pub fn extract_page_and_limit(uri: &Uri) -> (i64, i64) {
    extract_page_and_limit_with(uri, &PaginationConfig::default())
}

/// [`extract_page_and_limit`] with the defaults taken from `config`
pub fn extract_page_and_limit_with(uri: &Uri, config: &PaginationConfig) -> (i64, i64) {
    let query = uri.query();
    (
        parse_or_default(query, PAGE_PARAM, config.default_page),
        parse_or_default(query, LIMIT_PARAM, config.default_limit),
    )
}

/// Strict variant of [`extract_page_and_limit`]: absent or empty parameters
/// still default, but a non-integer value is an error
pub fn try_extract_page_and_limit(uri: &Uri) -> Result<(i64, i64), ParamError> {
    let query = uri.query();
    let page = parse_param(query, PAGE_PARAM)?.unwrap_or(DEFAULT_PAGE);
    let limit = parse_param(query, LIMIT_PARAM)?.unwrap_or(DEFAULT_LIMIT);
    Ok((page, limit))
}

fn parse_or_default(query: Option<&str>, name: &'static str, default: i64) -> i64 {
    match parse_param(query, name) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            debug!("{}; falling back to {}", e, default);
            default
        }
    }
}

/// First occurrence of `name`, `None` when absent or empty
fn parse_param(query: Option<&str>, name: &'static str) -> Result<Option<i64>, ParamError> {
    let Some(query) = query else {
        return Ok(None);
    };

    let value = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned());

    match value {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ParamError::InvalidInteger { name, value }),
    }
}

/// Page request read leniently from the query string.
///
/// Never rejects: malformed values silently fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default: 1)
    pub page: i64,
    /// Items per page (default: 10)
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (page, limit) = extract_page_and_limit(&parts.uri);
        Ok(Self { page, limit })
    }
}

/// Page request that answers 400 when `page` or `limit` is not an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StrictPageParams {
    /// 1-based page number (default: 1)
    pub page: i64,
    /// Items per page (default: 10)
    pub limit: i64,
}

impl<S> FromRequestParts<S> for StrictPageParams
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (page, limit) = try_extract_page_and_limit(&parts.uri)?;
        Ok(Self { page, limit })
    }
}

impl From<StrictPageParams> for PageParams {
    fn from(params: StrictPageParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
        }
    }
}
