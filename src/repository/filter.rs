//! Incremental WHERE-clause assembly for list and aggregate queries.
//!
//! Every value goes through `push_bind`; only column names and fixed SQL
//! fragments chosen by the repositories are written into the statement text.

use sqlx::{postgres::PgRow, Encode, FromRow, PgPool, Postgres, QueryBuilder, Type};

pub struct Filter {
    builder: QueryBuilder<'static, Postgres>,
}

impl Filter {
    /// Start from `<select> WHERE 1=1`
    pub fn new(select: &str) -> Self {
        let mut builder = QueryBuilder::new(select);
        builder.push(" WHERE 1=1");
        Self { builder }
    }

    /// `AND column = $n`, skipped when the value is missing or blank
    pub fn eq(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = present(value) {
            self.builder
                .push(" AND ")
                .push(column)
                .push(" = ")
                .push_bind(v.to_string());
        }
        self
    }

    /// `AND column ILIKE '%value%'`
    pub fn contains(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = present(value) {
            self.builder
                .push(" AND ")
                .push(column)
                .push(" ILIKE ")
                .push_bind(like_pattern(v));
        }
        self
    }

    /// `AND (c1 ILIKE $n OR c2 ILIKE $n+1 ...)`
    pub fn contains_any(&mut self, columns: &[&str], value: Option<&str>) -> &mut Self {
        if let Some(v) = present(value) {
            let pattern = like_pattern(v);
            self.builder.push(" AND (");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    self.builder.push(" OR ");
                }
                self.builder
                    .push(*column)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone());
            }
            self.builder.push(")");
        }
        self
    }

    /// `AND column >= $n`
    pub fn gte<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'static + Encode<'static, Postgres> + Send + Type<Postgres>,
    {
        self.compare(column, " >= ", value)
    }

    /// `AND column <= $n`
    pub fn lte<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'static + Encode<'static, Postgres> + Send + Type<Postgres>,
    {
        self.compare(column, " <= ", value)
    }

    fn compare<T>(&mut self, column: &str, op: &str, value: Option<T>) -> &mut Self
    where
        T: 'static + Encode<'static, Postgres> + Send + Type<Postgres>,
    {
        if let Some(v) = value {
            self.builder.push(" AND ").push(column).push(op).push_bind(v);
        }
        self
    }

    /// Append a fixed tail such as `GROUP BY` / `ORDER BY`
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.builder.push(" ").push(sql);
        self
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    pub async fn fetch_all<T>(mut self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.builder.build_query_as::<T>().fetch_all(pool).await
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Substring pattern with LIKE wildcards in the user input escaped
pub fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
