//! SQLite repositories
//!
//! Types (MemberRow, TeamRow, projections) should be imported from `crate::data::types`.
//! Query values (`MemberQuery`, `Predicate`, ...) come from `crate::data::filters`.

pub mod member;
mod query;
pub mod report;
pub mod team;

pub use member::{
    change_team, count_members, create_member, delete_member, fetch_member_teams, fetch_members,
    fetch_members_with_team, fetch_first_member, fetch_one_member, find_by_username, get_member,
    list_members, search, search_page,
};
pub use report::{
    age_brackets, age_labels, age_summary, find_oldest_members, member_dtos, team_age_averages,
    username_age_labels, usernames_with_average_age, usernames_with_constant, users_with_max_age,
};
pub use team::{create_team, get_team, list_teams};

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::data::sqlite::{SqliteService, seed_sample_data};

    /// Empty in-memory database with the current schema
    pub(crate) async fn setup_test_pool() -> SqlitePool {
        SqliteService::in_memory().await.unwrap().pool().clone()
    }

    /// In-memory database holding the sample teams and members
    pub(crate) async fn seeded_pool() -> SqlitePool {
        let pool = setup_test_pool().await;
        assert!(seed_sample_data(&pool).await.unwrap());
        pool
    }
}
