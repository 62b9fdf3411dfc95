//! axum integration for `paginator`.
//!
//! - [`PageParams`] / [`StrictPageParams`]: extract `page` and `limit` from the
//!   query string
//! - [`Problem`]: problem-details responses for [`paginator::PaginateError`]
//!   and malformed parameters
//!
//! ```rust,ignore
//! async fn list_users(
//!     State(paginator): State<Paginator<DatabaseConnection>>,
//!     params: PageParams,
//! ) -> Result<Json<Page<User>>, Problem> {
//!     let page = paginator
//!         .query_paginated(
//!             "SELECT id, name FROM users ORDER BY id",
//!             vec![],
//!             params.page,
//!             params.limit,
//!             scan_user,
//!         )
//!         .await?;
//!     Ok(Json(page))
//! }
//! ```

pub mod params;
pub mod problem;

pub use params::{
    extract_page_and_limit, extract_page_and_limit_with, try_extract_page_and_limit,
    PageParams, ParamError, StrictPageParams,
};
pub use problem::Problem;
