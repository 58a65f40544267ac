//! Aggregate and projection queries over members
//!
//! Aggregation, grouping, sub-queries, CASE expressions and string
//! concatenation. Each query maps its result row explicitly into a
//! projection type.

use sqlx::SqlitePool;

use super::query::{fetch_all, render};
use crate::data::filters::{Field, MemberQuery, Predicate, Projection, SqlParams};
use crate::data::sql::SqliteDialect;
use crate::data::sqlite::SqliteError;
use crate::data::types::{AgeSummary, MemberDto, MemberRow, TeamAgeAverage, UserDto};

/// Count, sum, average, min and max of member ages
pub async fn age_summary(pool: &SqlitePool) -> Result<AgeSummary, SqliteError> {
    let row = sqlx::query_as::<_, (i64, Option<i64>, Option<f64>, Option<i32>, Option<i32>)>(
        "SELECT COUNT(*), SUM(age), AVG(age), MIN(age), MAX(age) FROM member",
    )
    .fetch_one(pool)
    .await?;

    Ok(AgeSummary::from(row))
}

/// Average age per team, optionally only for teams whose name starts with `prefix`
pub async fn team_age_averages(
    pool: &SqlitePool,
    prefix: Option<&str>,
) -> Result<Vec<TeamAgeAverage>, SqliteError> {
    let mut params = SqlParams::default();
    let having = prefix
        .map(|p| Predicate::starts_with(Field::TeamName, p).to_sql(&SqliteDialect, &mut params))
        .map(|cond| format!(" HAVING {}", cond))
        .unwrap_or_default();

    let sql = format!(
        "SELECT t.name, AVG(m.age) FROM member m JOIN team t ON m.team_id = t.id \
         GROUP BY t.id, t.name{} ORDER BY t.name",
        having
    );
    let rows: Vec<(String, f64)> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(TeamAgeAverage::from).collect())
}

/// Members whose age equals the maximum age (sub-query in WHERE)
pub async fn find_oldest_members(pool: &SqlitePool) -> Result<Vec<MemberRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, Option<String>, i32, Option<i64>)>(
        "SELECT m.id, m.username, m.age, m.team_id FROM member m \
         WHERE m.age = (SELECT MAX(sub.age) FROM member sub) ORDER BY m.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MemberRow::from).collect())
}

/// Each username alongside the average age of all members (sub-query in SELECT)
pub async fn usernames_with_average_age(
    pool: &SqlitePool,
) -> Result<Vec<(Option<String>, f64)>, SqliteError> {
    let rows = sqlx::query_as::<_, (Option<String>, f64)>(
        "SELECT m.username, (SELECT AVG(sub.age) FROM member sub) FROM member m ORDER BY m.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Usernames projected as `name`, each paired with the maximum member age
pub async fn users_with_max_age(pool: &SqlitePool) -> Result<Vec<UserDto>, SqliteError> {
    let rows = sqlx::query_as::<_, (Option<String>, i32)>(
        "SELECT m.username AS name, (SELECT MAX(sub.age) FROM member sub) AS age \
         FROM member m ORDER BY m.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(UserDto::from).collect())
}

/// Label exact ages (simple CASE)
pub async fn age_labels(pool: &SqlitePool) -> Result<Vec<String>, SqliteError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT CASE m.age WHEN 10 THEN 'ten' WHEN 20 THEN 'twenty' ELSE 'other' END \
         FROM member m ORDER BY m.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Bucket ages into ranges (searched CASE)
pub async fn age_brackets(pool: &SqlitePool) -> Result<Vec<String>, SqliteError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT CASE \
             WHEN m.age BETWEEN 0 AND 20 THEN '0-20' \
             WHEN m.age BETWEEN 21 AND 30 THEN '21-30' \
             ELSE 'other' END \
         FROM member m ORDER BY m.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// `username_age` labels, e.g. `member1_10`; NULL when the username is NULL
pub async fn username_age_labels(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Vec<Option<String>>, SqliteError> {
    let (sql, params) = render(query, Projection::UsernameAgeLabel)?;
    let rows: Vec<(Option<String>,)> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(|(label,)| label).collect())
}

/// Each matched username paired with a constant text column
pub async fn usernames_with_constant(
    pool: &SqlitePool,
    query: &MemberQuery,
    constant: &'static str,
) -> Result<Vec<(Option<String>, String)>, SqliteError> {
    let (sql, params) = render(query, Projection::UsernameConstant(constant))?;
    fetch_all(pool, &sql, params).await
}

/// Username and age of each member matched by the query
pub async fn member_dtos(
    pool: &SqlitePool,
    query: &MemberQuery,
) -> Result<Vec<MemberDto>, SqliteError> {
    let (sql, params) = render(query, Projection::UsernameAge)?;
    let rows: Vec<(Option<String>, i32)> = fetch_all(pool, &sql, params).await?;
    Ok(rows.into_iter().map(MemberDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::TeamJoin;
    use crate::data::sqlite::repositories::member::create_member;
    use crate::data::sqlite::repositories::team::create_team;
    use crate::data::sqlite::repositories::test_support::{seeded_pool, setup_test_pool};

    #[tokio::test]
    async fn test_age_summary() {
        let pool = seeded_pool().await;
        let summary = age_summary(&pool).await.unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.sum, Some(100));
        assert_eq!(summary.avg, Some(25.0));
        assert_eq!(summary.min, Some(10));
        assert_eq!(summary.max, Some(40));
    }

    #[tokio::test]
    async fn test_age_summary_empty() {
        let pool = setup_test_pool().await;
        let summary = age_summary(&pool).await.unwrap();
        assert_eq!(summary.count, 0);
        assert!(summary.sum.is_none());
        assert!(summary.avg.is_none());
        assert!(summary.max.is_none());
    }

    #[tokio::test]
    async fn test_team_age_averages() {
        let pool = seeded_pool().await;
        let averages = team_age_averages(&pool, None).await.unwrap();
        assert_eq!(
            averages,
            vec![
                TeamAgeAverage {
                    team_name: "teamA".to_string(),
                    avg_age: 15.0
                },
                TeamAgeAverage {
                    team_name: "teamB".to_string(),
                    avg_age: 35.0
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_team_age_averages_having_prefix() {
        let pool = seeded_pool().await;
        let other = create_team(&pool, "otherTeam").await.unwrap();
        create_member(&pool, Some("member9"), 90, Some(other.id))
            .await
            .unwrap();

        let all = team_age_averages(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = team_age_averages(&pool, Some("team")).await.unwrap();
        let names: Vec<_> = filtered.iter().map(|a| a.team_name.as_str()).collect();
        assert_eq!(names, vec!["teamA", "teamB"]);

        // prefix match is case-sensitive
        assert!(team_age_averages(&pool, Some("TEAM")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_oldest_members() {
        let pool = seeded_pool().await;
        let oldest = find_oldest_members(&pool).await.unwrap();
        assert_eq!(oldest.len(), 1);
        assert_eq!(oldest[0].age, 40);
        assert_eq!(oldest[0].username.as_deref(), Some("member4"));
    }

    #[tokio::test]
    async fn test_usernames_with_average_age() {
        let pool = seeded_pool().await;
        let rows = usernames_with_average_age(&pool).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|(_, avg)| *avg == 25.0));
        assert_eq!(rows[0].0.as_deref(), Some("member1"));
    }

    #[tokio::test]
    async fn test_users_with_max_age() {
        let pool = seeded_pool().await;
        let users = users_with_max_age(&pool).await.unwrap();
        assert_eq!(users.len(), 4);
        assert_eq!(
            users[0],
            UserDto {
                name: Some("member1".to_string()),
                age: 40
            }
        );
        assert!(users.iter().all(|u| u.age == 40));
    }

    #[tokio::test]
    async fn test_age_labels_and_brackets() {
        let pool = seeded_pool().await;
        assert_eq!(
            age_labels(&pool).await.unwrap(),
            vec!["ten", "twenty", "other", "other"]
        );
        assert_eq!(
            age_brackets(&pool).await.unwrap(),
            vec!["0-20", "0-20", "21-30", "other"]
        );
    }

    #[tokio::test]
    async fn test_username_age_labels() {
        let pool = seeded_pool().await;
        create_member(&pool, None, 7, None).await.unwrap();

        let query = MemberQuery::new().filter(Predicate::eq(Field::Username, "member1"));
        assert_eq!(
            username_age_labels(&pool, &query).await.unwrap(),
            vec![Some("member1_10".to_string())]
        );

        let all = username_age_labels(&pool, &MemberQuery::new()).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all[4].is_none());
    }

    #[tokio::test]
    async fn test_usernames_with_constant() {
        let pool = seeded_pool().await;
        let query = MemberQuery::new().filter(Predicate::lte(Field::Age, 20));
        let rows = usernames_with_constant(&pool, &query, "A").await.unwrap();
        assert_eq!(
            rows,
            vec![
                (Some("member1".to_string()), "A".to_string()),
                (Some("member2".to_string()), "A".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_member_dtos() {
        let pool = seeded_pool().await;
        let query = MemberQuery::new()
            .join(TeamJoin::Left)
            .filter(Predicate::eq(Field::TeamName, "teamB"));
        let dtos = member_dtos(&pool, &query).await.unwrap();
        assert_eq!(
            dtos,
            vec![
                MemberDto {
                    username: Some("member3".to_string()),
                    age: 30
                },
                MemberDto {
                    username: Some("member4".to_string()),
                    age: 40
                },
            ]
        );
    }
}
