//! Sample data
//!
//! Two teams and four members, the first two in `teamA` and the rest in
//! `teamB`. Seeding is skipped when the database already has members.

use sqlx::SqlitePool;

use super::SqliteError;

const SAMPLE_TEAMS: [&str; 2] = ["teamA", "teamB"];

/// (username, age, index into SAMPLE_TEAMS)
const SAMPLE_MEMBERS: [(&str, i32, usize); 4] = [
    ("member1", 10, 0),
    ("member2", 20, 0),
    ("member3", 30, 1),
    ("member4", 40, 1),
];

/// Insert the sample teams and members in one transaction
///
/// Returns `false` without touching the database when members already exist.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool, SqliteError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Members present, skipping sample data");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut team_ids = Vec::with_capacity(SAMPLE_TEAMS.len());
    for name in SAMPLE_TEAMS {
        let id = sqlx::query("INSERT INTO team (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        team_ids.push(id);
    }

    for (username, age, team) in SAMPLE_MEMBERS {
        sqlx::query("INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)")
            .bind(username)
            .bind(age)
            .bind(team_ids[team])
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        teams = SAMPLE_TEAMS.len(),
        members = SAMPLE_MEMBERS.len(),
        "Sample data seeded"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteService;
    use crate::data::sqlite::repositories::{list_members, list_teams};

    #[tokio::test]
    async fn test_seed_once() {
        let service = SqliteService::in_memory().await.unwrap();
        let pool = service.pool();

        assert!(seed_sample_data(pool).await.unwrap());
        assert!(!seed_sample_data(pool).await.unwrap());

        let teams = list_teams(pool).await.unwrap();
        assert_eq!(teams.len(), 2);

        let members = list_members(pool).await.unwrap();
        assert_eq!(members.len(), 4);
        assert_eq!(members[0].team_id, Some(teams[0].id));
        assert_eq!(members[3].team_id, Some(teams[1].id));
        assert_eq!(members[3].age, 40);
    }
}
