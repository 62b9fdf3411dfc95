use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of decoded items plus the metadata describing its position.
///
/// `page` and `limit` echo the request unchanged; `total` counts every row the
/// base query matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page, deriving `total_pages` as `ceil(total / limit)`.
    ///
    /// A non-positive `limit` yields zero pages; the paginator rejects such
    /// limits before running a query.
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            items,
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }

    /// Convert the items, keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Integer ceiling of `total / limit`, zero when `limit` is not positive
pub(crate) fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}
