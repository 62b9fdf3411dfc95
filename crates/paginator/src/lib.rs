//! # paginator
//!
//! Offset/limit pagination for raw SQL queries running on sea-orm connections.
//!
//! Given a base query, its positional bind arguments, and a page/limit pair, the
//! [`Paginator`] appends an `OFFSET`/`LIMIT` clause, streams and decodes the rows,
//! then wraps the base query in a `COUNT(*)` subquery to compute the total.
//!
//! ## Architecture
//!
//! - **Paginator**: executes the paged query and the count query
//! - **RowDecoder**: caller-supplied conversion from a raw row to an item
//! - **Page**: the decoded items plus pagination metadata
//! - **PaginationConfig**: request defaults and the query timeout
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use paginator::{Paginator, Page, PaginateError};
//! use sea_orm::{DatabaseConnection, DbErr, QueryResult};
//!
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! fn decode_user(row: &QueryResult) -> Result<User, DbErr> {
//!     Ok(User {
//!         id: row.try_get("", "id")?,
//!         name: row.try_get("", "name")?,
//!     })
//! }
//!
//! # async fn example(db: Arc<DatabaseConnection>) -> Result<(), PaginateError> {
//! let paginator = Paginator::new(db);
//!
//! let page: Page<User> = paginator
//!     .query_paginated(
//!         "SELECT id, name FROM users WHERE active = $1 ORDER BY id",
//!         vec![true.into()],
//!         2,
//!         25,
//!         decode_user,
//!     )
//!     .await?;
//!
//! println!("page {} of {}", page.page, page.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod page;
pub mod paginator;
pub mod statement;

// Re-export commonly used items
pub use config::PaginationConfig;
pub use decoder::{FromRow, RowDecoder};
pub use error::{PaginateError, Result};
pub use page::Page;
pub use paginator::{paginate, Paginator};
pub use statement::PagedStatement;
