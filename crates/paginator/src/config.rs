//! Pagination configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page number used when the request does not supply one
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request does not supply one
pub const DEFAULT_LIMIT: i64 = 10;

/// Settings shared by every paginated query of a [`Paginator`](crate::Paginator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page: i64,
    pub default_limit: i64,

    /// Upper bound for the paged query and the count query together
    pub query_timeout_ms: Option<u64>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            query_timeout_ms: None,
        }
    }
}

impl PaginationConfig {
    /// Build a configuration from `PAGINATOR_*` environment variables.
    ///
    /// Missing or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_page: std::env::var("PAGINATOR_DEFAULT_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_page),
            default_limit: std::env::var("PAGINATOR_DEFAULT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_limit),
            query_timeout_ms: std::env::var("PAGINATOR_QUERY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(defaults.query_timeout_ms),
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }
}
