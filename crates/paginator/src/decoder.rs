//! Row decoding

use sea_orm::{DbErr, FromQueryResult, QueryResult};
use std::marker::PhantomData;

/// Converts one raw result row into an item.
///
/// Invoked once per row, in row order. Any function or closure with the shape
/// `Fn(&QueryResult) -> Result<T, DbErr>` is a decoder.
pub trait RowDecoder<T> {
    fn decode(&self, row: &QueryResult) -> Result<T, DbErr>;
}

impl<T, F> RowDecoder<T> for F
where
    F: Fn(&QueryResult) -> Result<T, DbErr>,
{
    fn decode(&self, row: &QueryResult) -> Result<T, DbErr> {
        self(row)
    }
}

/// Decodes rows through a model's [`FromQueryResult`] implementation
pub struct FromRow<M>(PhantomData<fn() -> M>);

impl<M> FromRow<M> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M> Default for FromRow<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for FromRow<M> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<M> Copy for FromRow<M> {}

impl<M: FromQueryResult> RowDecoder<M> for FromRow<M> {
    fn decode(&self, row: &QueryResult) -> Result<M, DbErr> {
        M::from_query_result(row, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseBackend, MockDatabase, Statement};

    #[derive(Debug, PartialEq, FromQueryResult)]
    struct User {
        id: i32,
        name: String,
    }

    async fn mock_rows() -> Vec<QueryResult> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[maplit::btreemap! {
                "id" => sea_orm::Value::Int(Some(7)),
                "name" => "Grace".into(),
            }]])
            .into_connection();

        db.query_all(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT id, name FROM users",
        ))
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_closure_decoder() {
        let rows = mock_rows().await;
        let decode = |row: &QueryResult| -> Result<String, DbErr> { row.try_get("", "name") };

        assert_eq!(decode.decode(&rows[0]).unwrap(), "Grace");
    }

    #[tokio::test]
    async fn test_from_row_decoder() {
        let rows = mock_rows().await;

        let user = FromRow::<User>::new().decode(&rows[0]).unwrap();
        assert_eq!(
            user,
            User {
                id: 7,
                name: "Grace".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_decoder_reports_missing_column() {
        let rows = mock_rows().await;
        let decode = |row: &QueryResult| -> Result<String, DbErr> { row.try_get("", "email") };

        assert!(decode.decode(&rows[0]).is_err());
    }
}
