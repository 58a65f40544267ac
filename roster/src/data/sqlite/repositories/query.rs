//! Execution of built member queries
//!
//! Validates a `MemberQuery`, renders it with the SQLite dialect and binds the
//! collected parameters.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

use crate::data::filters::{MemberQuery, Projection, SqlParams};
use crate::data::sql::SqliteDialect;
use crate::data::sqlite::SqliteError;

/// Validate and render a SELECT
pub(super) fn render(
    query: &MemberQuery,
    projection: Projection,
) -> Result<(String, SqlParams), SqliteError> {
    query.validate()?;
    Ok(query.to_sql(&SqliteDialect, projection))
}

/// Validate and render a COUNT over the same join and filter
pub(super) fn render_count(query: &MemberQuery) -> Result<(String, SqlParams), SqliteError> {
    query.validate()?;
    Ok(query.count_sql(&SqliteDialect))
}

pub(super) async fn fetch_all<O>(
    pool: &SqlitePool,
    sql: &str,
    params: SqlParams,
) -> Result<Vec<O>, SqliteError>
where
    O: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::trace!(%sql, params = params.values.len(), "Executing member query");
    let args = params.into_arguments()?;
    let rows = sqlx::query_as_with::<_, O, _>(sql, args)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub(super) async fn fetch_count(
    pool: &SqlitePool,
    sql: &str,
    params: SqlParams,
) -> Result<i64, SqliteError> {
    tracing::trace!(%sql, params = params.values.len(), "Executing count query");
    let args = params.into_arguments()?;
    let count = sqlx::query_scalar_with::<_, i64, _>(sql, args)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
