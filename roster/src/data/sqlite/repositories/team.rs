//! Team repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::TeamRow;

/// Create a new team
pub async fn create_team(pool: &SqlitePool, name: &str) -> Result<TeamRow, SqliteError> {
    let id = sqlx::query("INSERT INTO team (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?
        .last_insert_rowid();

    tracing::debug!(id, %name, "Team created");
    Ok(TeamRow {
        id,
        name: name.to_string(),
    })
}

/// Get a team by ID
pub async fn get_team(pool: &SqlitePool, id: i64) -> Result<Option<TeamRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM team WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(TeamRow::from))
}

/// List all teams in creation order
pub async fn list_teams(pool: &SqlitePool) -> Result<Vec<TeamRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM team ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(TeamRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::test_support::setup_test_pool;

    #[tokio::test]
    async fn test_create_and_get_team() {
        let pool = setup_test_pool().await;
        let team = create_team(&pool, "teamA").await.unwrap();
        assert!(team.id > 0);

        let fetched = get_team(&pool, team.id).await.unwrap();
        assert_eq!(fetched, Some(team));
    }

    #[tokio::test]
    async fn test_get_team_not_found() {
        let pool = setup_test_pool().await;
        assert!(get_team(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_teams_in_order() {
        let pool = setup_test_pool().await;
        create_team(&pool, "teamA").await.unwrap();
        create_team(&pool, "teamB").await.unwrap();

        let names: Vec<String> = list_teams(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["teamA", "teamB"]);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let pool = setup_test_pool().await;
        assert!(create_team(&pool, "").await.is_err());
    }
}
