//! Query projections
//!
//! Each projection is built from a result row by an explicit mapping
//! (`From` impls over the selected column tuple); none of them know about SQL.

use serde::Serialize;

use super::entities::{MemberRow, TeamRow};

/// Columns selected for a member joined with its team:
/// `m.id, m.username, m.age, m.team_id, t.id, t.name`
pub type MemberTeamTuple = (
    i64,
    Option<String>,
    i32,
    Option<i64>,
    Option<i64>,
    Option<String>,
);

/// Flattened member + team view (search results)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<MemberTeamTuple> for MemberTeamDto {
    fn from((member_id, username, age, _, team_id, team_name): MemberTeamTuple) -> Self {
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }
}

/// Member with its (optionally) joined team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberWithTeam {
    pub member: MemberRow,
    pub team: Option<TeamRow>,
}

impl From<MemberTeamTuple> for MemberWithTeam {
    fn from((id, username, age, member_team_id, team_id, team_name): MemberTeamTuple) -> Self {
        let team = match (team_id, team_name) {
            (Some(id), Some(name)) => Some(TeamRow { id, name }),
            _ => None,
        };
        Self {
            member: MemberRow {
                id,
                username,
                age,
                team_id: member_team_id,
            },
            team,
        }
    }
}

/// Username and age only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl From<(Option<String>, i32)> for MemberDto {
    fn from((username, age): (Option<String>, i32)) -> Self {
        Self { username, age }
    }
}

/// Member projected under different names (`name` instead of `username`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

impl From<(Option<String>, i32)> for UserDto {
    fn from((name, age): (Option<String>, i32)) -> Self {
        Self { name, age }
    }
}

/// Aggregates over member ages; `None` when there are no members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: i64,
    pub sum: Option<i64>,
    pub avg: Option<f64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl From<(i64, Option<i64>, Option<f64>, Option<i32>, Option<i32>)> for AgeSummary {
    fn from(
        (count, sum, avg, min, max): (i64, Option<i64>, Option<f64>, Option<i32>, Option<i32>),
    ) -> Self {
        Self {
            count,
            sum,
            avg,
            min,
            max,
        }
    }
}

/// Average member age per team
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub avg_age: f64,
}

impl From<(String, f64)> for TeamAgeAverage {
    fn from((team_name, avg_age): (String, f64)) -> Self {
        Self { team_name, avg_age }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_team_dto_from_row() {
        let row: MemberTeamTuple = (
            4,
            Some("member4".to_string()),
            40,
            Some(2),
            Some(2),
            Some("teamB".to_string()),
        );
        let dto = MemberTeamDto::from(row);
        assert_eq!(dto.member_id, 4);
        assert_eq!(dto.team_name.as_deref(), Some("teamB"));
    }

    #[test]
    fn member_with_team_drops_unmatched_team() {
        // LEFT JOIN ... ON filter: member has a team_id but no joined team
        let row: MemberTeamTuple = (3, Some("member3".to_string()), 30, Some(2), None, None);
        let mwt = MemberWithTeam::from(row);
        assert_eq!(mwt.member.team_id, Some(2));
        assert!(mwt.team.is_none());
    }

    #[test]
    fn member_team_dto_serializes_camel_case() {
        let dto = MemberTeamDto {
            member_id: 1,
            username: None,
            age: 10,
            team_id: None,
            team_name: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("memberId").is_some());
        assert!(json.get("teamName").is_some());
    }
}
