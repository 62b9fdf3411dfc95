//! SQL text derivation for the paged query and the count query

use sea_orm::{DbBackend, Statement, Value};

/// A caller-supplied base query together with its positional arguments.
///
/// The base query is treated as opaque text: it is concatenated with the
/// `OFFSET`/`LIMIT` clause and wrapped in the count subquery, never parsed.
#[derive(Debug, Clone)]
pub struct PagedStatement<'q> {
    backend: DbBackend,
    query: &'q str,
    args: Vec<Value>,
}

impl<'q> PagedStatement<'q> {
    pub fn new(backend: DbBackend, query: &'q str, args: Vec<Value>) -> Self {
        Self {
            backend,
            query,
            args,
        }
    }

    /// Rows to skip for a 1-based `page`, or `None` when it does not fit in an `i64`.
    ///
    /// Not clamped: page 0 yields a negative offset.
    pub fn offset(page: i64, limit: i64) -> Option<i64> {
        page.checked_sub(1)?.checked_mul(limit)
    }

    /// `<query> OFFSET <p> LIMIT <p>`, placeholders numbered after the existing arguments
    pub fn paged_sql(&self) -> String {
        let n = self.args.len();
        format!(
            "{} OFFSET {} LIMIT {}",
            self.query,
            self.placeholder(n + 1),
            self.placeholder(n + 2)
        )
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ( {} ) AS subquery", self.query)
    }

    /// The paged statement, binding the arguments followed by offset and limit
    pub fn paged(&self, offset: i64, limit: i64) -> Statement {
        let mut values = self.args.clone();
        values.push(Value::BigInt(Some(offset)));
        values.push(Value::BigInt(Some(limit)));

        Statement::from_sql_and_values(self.backend, self.paged_sql(), values)
    }

    /// The count statement, binding the original arguments unmodified
    pub fn count(&self) -> Statement {
        Statement::from_sql_and_values(self.backend, self.count_sql(), self.args.clone())
    }

    fn placeholder(&self, index: usize) -> String {
        match self.backend {
            DbBackend::Postgres => format!("${}", index),
            _ => "?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_sql_without_args() {
        let stmt = PagedStatement::new(
            DbBackend::Postgres,
            "SELECT id, name FROM users WHERE active = true",
            vec![],
        );
        assert_eq!(
            stmt.paged_sql(),
            "SELECT id, name FROM users WHERE active = true OFFSET $1 LIMIT $2"
        );
    }

    #[test]
    fn test_paged_sql_numbers_after_existing_args() {
        let stmt = PagedStatement::new(
            DbBackend::Postgres,
            "SELECT id FROM users WHERE org_id = $1 AND role = $2",
            vec![3.into(), "admin".into()],
        );
        assert_eq!(
            stmt.paged_sql(),
            "SELECT id FROM users WHERE org_id = $1 AND role = $2 OFFSET $3 LIMIT $4"
        );
    }

    #[test]
    fn test_question_mark_placeholders() {
        for backend in [DbBackend::MySql, DbBackend::Sqlite] {
            let stmt = PagedStatement::new(backend, "SELECT id FROM users WHERE id > ?", vec![1.into()]);
            assert_eq!(stmt.paged_sql(), "SELECT id FROM users WHERE id > ? OFFSET ? LIMIT ?");
        }
    }

    #[test]
    fn test_count_sql_wraps_base_query() {
        let stmt = PagedStatement::new(DbBackend::Postgres, "SELECT id, name FROM users", vec![]);
        assert_eq!(
            stmt.count_sql(),
            "SELECT COUNT(*) FROM ( SELECT id, name FROM users ) AS subquery"
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(PagedStatement::offset(1, 10), Some(0));
        assert_eq!(PagedStatement::offset(2, 2), Some(2));
        assert_eq!(PagedStatement::offset(5, 25), Some(100));
        assert_eq!(PagedStatement::offset(0, 10), Some(-10));
        assert_eq!(PagedStatement::offset(1, i64::MAX), Some(0));
    }

    #[test]
    fn test_offset_overflow() {
        assert_eq!(PagedStatement::offset(i64::MIN, 10), None);
        assert_eq!(PagedStatement::offset(3, i64::MAX), None);
        assert_eq!(PagedStatement::offset(i64::MAX, 2), None);
    }

    #[test]
    fn test_paged_binds_offset_then_limit() {
        let stmt = PagedStatement::new(
            DbBackend::Postgres,
            "SELECT id FROM users WHERE org_id = $1",
            vec![9.into()],
        );

        let paged = stmt.paged(40, 20);
        let values = paged.values.expect("paged statement binds values").0;
        assert_eq!(
            values,
            vec![Value::Int(Some(9)), Value::BigInt(Some(40)), Value::BigInt(Some(20))]
        );

        let count = stmt.count();
        assert_eq!(count.values.expect("count binds values").0, vec![Value::Int(Some(9))]);
    }
}
