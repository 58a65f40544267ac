//! RosterRepository trait implementation for SQLite
//!
//! Implements `RosterRepository` for `Arc<SqliteService>` by delegating to the
//! free functions in `repositories`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::{MemberQuery, MemberSearchCondition, OrderSpec, Page, Predicate};
use crate::data::traits::RosterRepository;
use crate::data::types::{
    AgeSummary, MemberDto, MemberRow, MemberTeamDto, MemberWithTeam, TeamAgeAverage, TeamRow,
    UserDto,
};

use super::SqliteService;
use super::repositories::{member, report, team};

#[async_trait]
impl RosterRepository for Arc<SqliteService> {
    // ==================== Team Operations ====================

    async fn create_team(&self, name: &str) -> Result<TeamRow, DataError> {
        team::create_team(self.pool(), name)
            .await
            .map_err(Into::into)
    }

    async fn get_team(&self, id: i64) -> Result<Option<TeamRow>, DataError> {
        team::get_team(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_teams(&self) -> Result<Vec<TeamRow>, DataError> {
        team::list_teams(self.pool())
            .await
            .map_err(Into::into)
    }

    // ==================== Member Operations ====================

    async fn create_member(
        &self,
        username: Option<&str>,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<MemberRow, DataError> {
        member::create_member(self.pool(), username, age, team_id)
            .await
            .map_err(Into::into)
    }

    async fn get_member(&self, id: i64) -> Result<Option<MemberRow>, DataError> {
        member::get_member(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_members(&self) -> Result<Vec<MemberRow>, DataError> {
        member::list_members(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<MemberRow>, DataError> {
        member::find_by_username(self.pool(), username)
            .await
            .map_err(Into::into)
    }

    async fn change_team(&self, id: i64, team_id: Option<i64>) -> Result<bool, DataError> {
        member::change_team(self.pool(), id, team_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_member(&self, id: i64) -> Result<bool, DataError> {
        member::delete_member(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== Query Operations ====================

    async fn count_members(&self, predicate: &Predicate) -> Result<i64, DataError> {
        member::count_members(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    async fn fetch_members(&self, query: &MemberQuery) -> Result<Vec<MemberRow>, DataError> {
        member::fetch_members(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn fetch_one_member(&self, query: &MemberQuery) -> Result<Option<MemberRow>, DataError> {
        member::fetch_one_member(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn fetch_first_member(
        &self,
        query: &MemberQuery,
    ) -> Result<Option<MemberRow>, DataError> {
        member::fetch_first_member(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn fetch_member_teams(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<MemberTeamDto>, DataError> {
        member::fetch_member_teams(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn fetch_members_with_team(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<MemberWithTeam>, DataError> {
        member::fetch_members_with_team(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, DataError> {
        member::search(self.pool(), condition)
            .await
            .map_err(Into::into)
    }

    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        order: &[OrderSpec],
        page: Page,
    ) -> Result<(Vec<MemberTeamDto>, i64), DataError> {
        member::search_page(self.pool(), condition, order, page)
            .await
            .map_err(Into::into)
    }

    // ==================== Report Operations ====================

    async fn age_summary(&self) -> Result<AgeSummary, DataError> {
        report::age_summary(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn team_age_averages(
        &self,
        prefix: Option<&str>,
    ) -> Result<Vec<TeamAgeAverage>, DataError> {
        report::team_age_averages(self.pool(), prefix)
            .await
            .map_err(Into::into)
    }

    async fn find_oldest_members(&self) -> Result<Vec<MemberRow>, DataError> {
        report::find_oldest_members(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn usernames_with_average_age(&self) -> Result<Vec<(Option<String>, f64)>, DataError> {
        report::usernames_with_average_age(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn users_with_max_age(&self) -> Result<Vec<UserDto>, DataError> {
        report::users_with_max_age(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn age_labels(&self) -> Result<Vec<String>, DataError> {
        report::age_labels(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn age_brackets(&self) -> Result<Vec<String>, DataError> {
        report::age_brackets(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn username_age_labels(
        &self,
        query: &MemberQuery,
    ) -> Result<Vec<Option<String>>, DataError> {
        report::username_age_labels(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    async fn usernames_with_constant(
        &self,
        query: &MemberQuery,
        constant: &'static str,
    ) -> Result<Vec<(Option<String>, String)>, DataError> {
        report::usernames_with_constant(self.pool(), query, constant)
            .await
            .map_err(Into::into)
    }

    async fn member_dtos(&self, query: &MemberQuery) -> Result<Vec<MemberDto>, DataError> {
        report::member_dtos(self.pool(), query)
            .await
            .map_err(Into::into)
    }

    // ==================== Maintenance ====================

    async fn seed_sample_data(&self) -> Result<bool, DataError> {
        super::seed_sample_data(self.pool())
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::Field;

    async fn repository() -> Arc<SqliteService> {
        let service = Arc::new(SqliteService::in_memory().await.unwrap());
        assert!(service.seed_sample_data().await.unwrap());
        service
    }

    #[tokio::test]
    async fn test_search_through_trait_object() {
        let repo: Box<dyn RosterRepository> = Box::new(repository().await);
        let condition = MemberSearchCondition::default()
            .team_name("teamB")
            .age_goe(35)
            .age_loe(40);

        let rows = repo.search(&condition).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username.as_deref(), Some("member4"));
    }

    #[tokio::test]
    async fn test_errors_are_unified() {
        let repo = repository().await;
        let err = repo
            .fetch_one_member(&MemberQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NonUniqueResult));

        let err = repo
            .fetch_members(&MemberQuery::new().filter(Predicate::eq(Field::TeamName, "teamA")))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let repo = repository().await;
        let team = repo.create_team("teamC").await.unwrap();
        let member = repo
            .create_member(Some("member5"), 50, Some(team.id))
            .await
            .unwrap();

        assert_eq!(repo.get_team(team.id).await.unwrap(), Some(team));
        assert_eq!(repo.find_by_username("member5").await.unwrap(), vec![member.clone()]);
        assert!(repo.delete_member(member.id).await.unwrap());
        assert_eq!(repo.list_members().await.unwrap().len(), 4);
        assert!(!repo.seed_sample_data().await.unwrap());
    }

    #[tokio::test]
    async fn test_constant_projection() {
        let repo = repository().await;
        let query = MemberQuery::new().filter(Predicate::eq(Field::Username, "member3"));
        let rows = repo.usernames_with_constant(&query, "A").await.unwrap();
        assert_eq!(rows, vec![(Some("member3".to_string()), "A".to_string())]);
    }
}
