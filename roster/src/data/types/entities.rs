//! Entity rows (SQLite tables `team` and `member`)

use serde::{Deserialize, Serialize};

// ============================================================================
// Team types
// ============================================================================

/// Team row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
}

// ============================================================================
// Member types
// ============================================================================

/// Member row from database
///
/// `team_id` references `team.id` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl From<(i64, String)> for TeamRow {
    fn from((id, name): (i64, String)) -> Self {
        Self { id, name }
    }
}

impl From<(i64, Option<String>, i32, Option<i64>)> for MemberRow {
    fn from((id, username, age, team_id): (i64, Option<String>, i32, Option<i64>)) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}
