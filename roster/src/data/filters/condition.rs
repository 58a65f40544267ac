//! Member search condition
//!
//! Every field is optional; an absent field places no constraint on that
//! dimension.

use serde::Deserialize;

use super::error::FilterError;

/// Maximum size of condition JSON in bytes (16KB)
const MAX_CONDITION_JSON_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.team_name.is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }

    /// Parse a condition from JSON (e.g. `{"teamName": "teamB", "ageGoe": 35}`)
    pub fn from_json(json_str: &str) -> Result<Self, FilterError> {
        if json_str.len() > MAX_CONDITION_JSON_SIZE {
            return Err(FilterError::ConditionTooLarge {
                max: MAX_CONDITION_JSON_SIZE,
            });
        }
        Ok(serde_json::from_str(json_str)?)
    }

    /// Fill fields left empty here from `other`
    pub fn or(self, other: MemberSearchCondition) -> Self {
        Self {
            username: self.username.or(other.username),
            team_name: self.team_name.or(other.team_name),
            age_goe: self.age_goe.or(other.age_goe),
            age_loe: self.age_loe.or(other.age_loe),
        }
    }
}
