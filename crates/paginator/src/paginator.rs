//! Paginated query execution

use crate::config::PaginationConfig;
use crate::decoder::RowDecoder;
use crate::error::{PaginateError, Result};
use crate::page::Page;
use crate::statement::PagedStatement;
use futures::StreamExt;
use sea_orm::{
    AccessMode, ConnectionTrait, DbErr, IsolationLevel, StreamTrait, TransactionTrait, Value,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Runs offset/limit paginated queries against a shared connection
pub struct Paginator<C> {
    db: Arc<C>,
    config: PaginationConfig,
}

impl<C> Clone for Paginator<C> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            config: self.config.clone(),
        }
    }
}

impl<C> Paginator<C> {
    pub fn new(db: Arc<C>) -> Self {
        Self {
            db,
            config: PaginationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PaginationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Give back the shared connection
    pub fn into_inner(self) -> Arc<C> {
        self.db
    }

    async fn with_timeout<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.config.query_timeout_ms {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), fut)
                .await
                .map_err(|_| PaginateError::Timeout(ms))?,
            None => fut.await,
        }
    }
}

impl<C> Paginator<C>
where
    C: ConnectionTrait + StreamTrait,
{
    /// Fetch one page of `query` and count every row it matches.
    ///
    /// `query` must not end with a row-limiting clause; `args` bind its
    /// existing positional placeholders in order. `page` is 1-based and only
    /// rejected when the offset would overflow, `limit` must be positive.
    ///
    /// The paged query and the count query are separate statements, so under
    /// concurrent writes `items` and `total` can come from different snapshots.
    /// Use [`Paginator::query_paginated_snapshot`] when that matters.
    pub async fn query_paginated<T, D>(
        &self,
        query: &str,
        args: Vec<Value>,
        page: i64,
        limit: i64,
        decode: D,
    ) -> Result<Page<T>>
    where
        D: RowDecoder<T> + Sync,
        T: Send,
    {
        self.with_timeout(paginate(self.db.as_ref(), query, args, page, limit, &decode))
            .await
    }
}

impl<C> Paginator<C>
where
    C: ConnectionTrait + StreamTrait + TransactionTrait,
{
    /// Like [`Paginator::query_paginated`], but both statements run inside one
    /// read-only repeatable-read transaction so `items` and `total` agree.
    pub async fn query_paginated_snapshot<T, D>(
        &self,
        query: &str,
        args: Vec<Value>,
        page: i64,
        limit: i64,
        decode: D,
    ) -> Result<Page<T>>
    where
        D: RowDecoder<T> + Sync,
        T: Send,
    {
        checked_offset(page, limit)?;

        self.with_timeout(async {
            let txn = self
                .db
                .begin_with_config(
                    Some(IsolationLevel::RepeatableRead),
                    Some(AccessMode::ReadOnly),
                )
                .await
                .map_err(PaginateError::Transaction)?;

            // An early return drops `txn`, which rolls it back
            let result = paginate(&txn, query, args, page, limit, &decode).await?;

            txn.commit().await.map_err(PaginateError::Transaction)?;
            Ok(result)
        })
        .await
    }
}

/// Reject bad bounds before anything touches the database
fn checked_offset(page: i64, limit: i64) -> Result<i64> {
    if limit <= 0 {
        return Err(PaginateError::InvalidLimit(limit));
    }
    PagedStatement::offset(page, limit).ok_or(PaginateError::PageOutOfRange { page, limit })
}

/// Fetch one page of `query` on any connection or transaction.
///
/// Appends `OFFSET`/`LIMIT` placeholders after the existing arguments, streams
/// and decodes the rows, then counts the base query's rows with the original
/// arguments. The row stream is released before the count query starts.
///
/// A decode failure aborts the call without running the count query. An error
/// the row stream reports after yielding rows still lets the count run, then
/// replaces the assembled page.
pub async fn paginate<C, T, D>(
    db: &C,
    query: &str,
    args: Vec<Value>,
    page: i64,
    limit: i64,
    decode: &D,
) -> Result<Page<T>>
where
    C: ConnectionTrait + StreamTrait,
    D: RowDecoder<T> + Sync + ?Sized,
    T: Send,
{
    let offset = checked_offset(page, limit)?;

    let statement = PagedStatement::new(db.get_database_backend(), query, args);

    let paged = statement.paged(offset, limit);
    debug!("Executing paginated query: {}", paged.sql);

    let mut items = Vec::new();
    let mut stream_error: Option<DbErr> = None;
    {
        let rows = db.stream(paged).await.map_err(PaginateError::Query)?;
        futures::pin_mut!(rows);

        while let Some(row) = rows.next().await {
            match row {
                Ok(row) => items.push(decode.decode(&row).map_err(PaginateError::Decode)?),
                // Execution failures surface as the first item of the stream
                Err(e) if items.is_empty() => return Err(PaginateError::Query(e)),
                Err(e) => {
                    stream_error = Some(e);
                    break;
                }
            }
        }
    }

    let count = statement.count();
    debug!("Executing count query: {}", count.sql);

    let total: i64 = db
        .query_one(count)
        .await
        .map_err(PaginateError::Count)?
        .ok_or_else(|| {
            PaginateError::Count(DbErr::RecordNotFound(
                "count query returned no rows".to_string(),
            ))
        })?
        .try_get_by_index(0)
        .map_err(PaginateError::Count)?;

    let result = Page::new(items, page, limit, total);

    debug!(
        "Fetched {} rows for page {} (total {}, {} pages)",
        result.items.len(),
        page,
        total,
        result.total_pages
    );

    match stream_error {
        Some(e) => Err(PaginateError::Stream(e)),
        None => Ok(result),
    }
}
