use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by a paginated query.
///
/// Database failures are wrapped transparently so their display text reaches
/// the caller unchanged; the variant records which step produced them.
#[derive(Error, Debug)]
pub enum PaginateError {
    /// The paged query could not be executed
    #[error(transparent)]
    Query(DbErr),

    /// A row could not be decoded into the requested item type
    #[error(transparent)]
    Decode(DbErr),

    /// The row stream reported an error after yielding rows
    #[error(transparent)]
    Stream(DbErr),

    /// The count query failed or returned no usable total
    #[error(transparent)]
    Count(DbErr),

    /// Opening or committing the snapshot transaction failed
    #[error(transparent)]
    Transaction(DbErr),

    /// The page size was zero or negative
    #[error("Invalid limit: {0} (must be greater than zero)")]
    InvalidLimit(i64),

    /// `(page - 1) * limit` does not fit in an `i64`
    #[error("Page {page} with limit {limit} is out of range")]
    PageOutOfRange { page: i64, limit: i64 },

    /// The configured query timeout elapsed
    #[error("Paginated query timed out after {0}ms")]
    Timeout(u64),
}

impl PaginateError {
    /// The underlying database error, if this failure came from the database
    pub fn db_err(&self) -> Option<&DbErr> {
        match self {
            PaginateError::Query(e)
            | PaginateError::Decode(e)
            | PaginateError::Stream(e)
            | PaginateError::Count(e)
            | PaginateError::Transaction(e) => Some(e),
            PaginateError::InvalidLimit(_)
            | PaginateError::PageOutOfRange { .. }
            | PaginateError::Timeout(_) => None,
        }
    }

    /// Whether the caller supplied the bad input, as opposed to the database failing
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaginateError::InvalidLimit(_) | PaginateError::PageOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PaginateError>;
