//! Member repository for SQLite operations
//!
//! CRUD on `member` plus execution of `MemberQuery` values. Searches go
//! through the filter composer: a `MemberSearchCondition` becomes one
//! predicate over `member m LEFT JOIN team t`.

use sqlx::SqlitePool;

use super::query::{fetch_all, fetch_count, render, render_count};
use crate::data::filters::{
    Field, MemberQuery, MemberSearchCondition, OrderSpec, Page, Predicate, Projection, TeamJoin,
    compose,
};
use crate::data::sqlite::SqliteError;
use crate::data::types::{MemberRow, MemberTeamDto, MemberTeamTuple, MemberWithTeam};

type MemberTuple = (i64, Option<String>, i32, Option<i64>);

/// Create a new member, optionally assigned to a team
pub async fn create_member(
    pool: &SqlitePool,
    username: Option<&str>,
    age: i32,
    team_id: Option<i64>,
) -> Result<MemberRow, SqliteError> {
    let id = sqlx::query("INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)")
        .bind(username)
        .bind(age)
        .bind(team_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    tracing::debug!(id, ?username, age, ?team_id, "Member created");
    Ok(MemberRow {
        id,
        username: username.map(String::from),
        age,
        team_id,
    })
}

/// Get a member by ID
pub async fn get_member(pool: &SqlitePool, id: i64) -> Result<Option<MemberRow>, SqliteError> {
    let row = sqlx::query_as::<_, MemberTuple>(
        "SELECT id, username, age, team_id FROM member WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(MemberRow::from))
}

/// List all members in creation order
pub async fn list_members(pool: &SqlitePool) -> Result<Vec<MemberRow>, SqliteError> {
    let rows = sqlx::query_as::<_, MemberTuple>(
        "SELECT id, username, age, team_id FROM member ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MemberRow::from).collect())
}

/// Members with exactly this username (usernames are not unique)
pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<MemberRow>, SqliteError> {
    let query = MemberQuery::new().filter(Predicate::eq(Field::Username, username));
    fetch_members(pool, &query).await
}

/// Move a member to another team (or out of any team)
///
/// Returns `false` when the member does not exist.
pub async fn change_team(
    pool: &SqlitePool,
    id: i64,
    team_id: Option<i64>,
) -> Result<bool, SqliteError> {
    let result = sqlx::query("UPDATE member SET team_id = ? WHERE id = ?")
        .bind(team_id)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a member. Returns `false` when the member does not exist.
pub async fn delete_member(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::debug!(id, "Member deleted");
    }
    Ok(result.rows_affected() > 0)
}

/// Count members matching a predicate
///
/// Team fields in the predicate bring in a left join on the member's team.
pub async fn count_members(pool: &SqlitePool, predicate: &Predicate) -> Result<i64, SqliteError> {
    let join = if predicate.references_team() {
        TeamJoin::Left
    } else {
        TeamJoin::None
    };
    let query = MemberQuery::new().join(join).filter(predicate.clone());
    let (sql, params) = render_count(&query)?;
    fetch_count(pool, &sql, params).await
}

/// Run a query and return member rows
pub async fn fetch_members(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Vec<MemberRow>, SqliteError> {
    let (sql, params) = render(query, Projection::Member)?;
    let rows: Vec<MemberTuple> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(MemberRow::from).collect())
}

/// Run a query expected to match at most one member
///
/// Fails with `NonUniqueResult` when more than one row matches. At most two
/// rows are read, starting at the query's offset.
pub async fn fetch_one_member(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Option<MemberRow>, SqliteError> {
    let page = match query.page {
        Some(p) => Page::new(p.offset, p.limit.min(2)),
        None => Page::new(0, 2),
    };
    let mut rows = fetch_members(pool, &query.clone().page(page)).await?;
    if rows.len() > 1 {
        return Err(SqliteError::NonUniqueResult);
    }
    Ok(rows.pop())
}

/// First member of a query's result (honours the query's offset)
pub async fn fetch_first_member(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Option<MemberRow>, SqliteError> {
    let offset = query.page.map_or(0, |p| p.offset);
    let query = query.clone().page(Page::new(offset, 1));
    Ok(fetch_members(pool, &query).await?.into_iter().next())
}

/// Run a query and return flattened member/team rows
pub async fn fetch_member_teams(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Vec<MemberTeamDto>, SqliteError> {
    let (sql, params) = render(query, Projection::MemberAndTeam)?;
    let rows: Vec<MemberTeamTuple> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(MemberTeamDto::from).collect())
}

/// Run a query and return members paired with their joined team
pub async fn fetch_members_with_team(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Vec<MemberWithTeam>, SqliteError> {
    let (sql, params) = render(query, Projection::MemberAndTeam)?;
    let rows: Vec<MemberTeamTuple> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(MemberWithTeam::from).collect())
}

/// Query for a search condition: members left-joined to their team,
/// filtered by the composed predicate
fn search_query(condition: &MemberSearchCondition) -> MemberQuery {
    MemberQuery::new()
        .join(TeamJoin::Left)
        .filter(compose(condition))
}

/// Search members by condition; an empty condition returns every member
pub async fn search(
    pool: &SqlitePool,
    condition: &MemberSearchCondition,
) -> Result<Vec<MemberTeamDto>, SqliteError> {
    fetch_member_teams(pool, &search_query(condition)).await
}

/// Search with ordering and paging. Returns the page and the total match count.
pub async fn search_page(
    pool: &SqlitePool,
    condition: &MemberSearchCondition,
    order: &[OrderSpec],
    page: Page,
) -> Result<(Vec<MemberTeamDto>, i64), SqliteError> {
    let mut query = search_query(condition);
    for spec in order {
        query = query.order_by(*spec);
    }

    let (count_sql, count_params) = render_count(&query)?;
    let total = fetch_count(pool, &count_sql, count_params).await?;

    let rows = fetch_member_teams(pool, &query.page(page)).await?;
    Ok((rows, total))
}
