//! Dynamic filter composition
//!
//! Maps a [`MemberSearchCondition`] to a single predicate. Each condition field
//! contributes at most one atomic predicate; the present ones are ANDed.

use super::condition::MemberSearchCondition;
use super::predicate::{Field, Predicate};

/// Compose the search predicate for a condition.
///
/// An empty condition composes to `Predicate::True`. A lower age bound above
/// the upper bound is not rejected, it just matches nothing.
pub fn compose(condition: &MemberSearchCondition) -> Predicate {
    Predicate::all([
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ])
}

pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    username.map(|u| Predicate::eq(Field::Username, u))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    team_name.map(|t| Predicate::eq(Field::TeamName, t))
}

pub fn age_goe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::gte(Field::Age, a))
}

pub fn age_loe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::lte(Field::Age, a))
}
