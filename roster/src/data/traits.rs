//! Repository trait for the roster store
//!
//! Backend-agnostic surface over teams, members, searches and reports.
//! Implemented for `Arc<SqliteService>`.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::{MemberQuery, MemberSearchCondition, OrderSpec, Page, Predicate};
use crate::data::types::{
    AgeSummary, MemberDto, MemberRow, MemberTeamDto, MemberWithTeam, TeamAgeAverage, TeamRow,
    UserDto,
};

/// Repository trait for roster operations
#[async_trait]
pub trait RosterRepository: Send + Sync {
    // ==================== Team Operations ====================

    async fn create_team(&self, name: &str) -> Result<TeamRow, DataError>;

    async fn get_team(&self, id: i64) -> Result<Option<TeamRow>, DataError>;

    async fn list_teams(&self) -> Result<Vec<TeamRow>, DataError>;

    // ==================== Member Operations ====================

    async fn create_member(
        &self,
        username: Option<&str>,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<MemberRow, DataError>;

    async fn get_member(&self, id: i64) -> Result<Option<MemberRow>, DataError>;

    async fn list_members(&self) -> Result<Vec<MemberRow>, DataError>;

    async fn find_by_username(&self, username: &str) -> Result<Vec<MemberRow>, DataError>;

    /// Returns `false` when the member does not exist
    async fn change_team(&self, id: i64, team_id: Option<i64>) -> Result<bool, DataError>;

    /// Returns `false` when the member does not exist
    async fn delete_member(&self, id: i64) -> Result<bool, DataError>;

    // ==================== Query Operations ====================

    async fn count_members(&self, predicate: &Predicate) -> Result<i64, DataError>;

    async fn fetch_members(&self, query: &MemberQuery) -> Result<Vec<MemberRow>, DataError>;

    /// Errors with `NonUniqueResult` when more than one member matches
    async fn fetch_one_member(&self, query: &MemberQuery) -> Result<Option<MemberRow>, DataError>;

    async fn fetch_first_member(
        &self,
        query: &MemberQuery,
    ) -> Result<Option<MemberRow>, DataError>;

    async fn fetch_member_teams(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<MemberTeamDto>, DataError>;

    async fn fetch_members_with_team(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<MemberWithTeam>, DataError>;

    /// Search by condition; absent fields place no constraint
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, DataError>;

    /// Search with ordering and paging, returning the page and total count
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        order: &[OrderSpec],
        page: Page,
    ) -> Result<(Vec<MemberTeamDto>, i64), DataError>;

    // ==================== Report Operations ====================

    async fn age_summary(&self) -> Result<AgeSummary, DataError>;

    async fn team_age_averages(
        &self,
        prefix: Option<&str>,
    ) -> Result<Vec<TeamAgeAverage>, DataError>;

    async fn find_oldest_members(&self) -> Result<Vec<MemberRow>, DataError>;

    async fn usernames_with_average_age(&self) -> Result<Vec<(Option<String>, f64)>, DataError>;

    async fn users_with_max_age(&self) -> Result<Vec<UserDto>, DataError>;

    async fn age_labels(&self) -> Result<Vec<String>, DataError>;

    async fn age_brackets(&self) -> Result<Vec<String>, DataError>;

    async fn username_age_labels(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<Option<String>>, DataError>;

    async fn usernames_with_constant(
        &self,
        query: &MemberQuery,
        constant: &'static str,
    ) -> Result<Vec<(Option<String>, String)>, DataError>;

    async fn member_dtos(&self, query: &MemberQuery) -> Result<Vec<MemberDto>, DataError>;

    // ==================== Maintenance ====================

    /// Insert sample data into an empty database; `false` when skipped
    async fn seed_sample_data(&self) -> Result<bool, DataError>;
}
