//! In-memory predicate evaluation
//!
//! Mirrors SQL three-valued logic: a comparison involving NULL is unknown,
//! and unknown never matches. `NOT unknown` stays unknown.

use std::cmp::Ordering;

use super::predicate::{CompareOp, Field, Predicate, Value};
use crate::data::types::{MemberTeamDto, MemberWithTeam};

/// Row-like value that can expose member/team fields.
///
/// Team fields of a member without a team read as `Value::Null`.
pub trait Row {
    fn field(&self, field: Field) -> Value;
}

impl Row for MemberTeamDto {
    fn field(&self, field: Field) -> Value {
        match field {
            Field::MemberId => Value::Int(self.member_id),
            Field::Username => self.username.clone().into(),
            Field::Age => self.age.into(),
            Field::TeamId => self.team_id.into(),
            Field::TeamName => self.team_name.clone().into(),
        }
    }
}

impl Row for MemberWithTeam {
    fn field(&self, field: Field) -> Value {
        match field {
            Field::MemberId => Value::Int(self.member.id),
            Field::Username => self.member.username.clone().into(),
            Field::Age => self.member.age.into(),
            Field::TeamId => self.team.as_ref().map(|t| t.id).into(),
            Field::TeamName => self.team.as_ref().map(|t| t.name.clone()).into(),
        }
    }
}

impl Predicate {
    /// True when the row satisfies the predicate
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.eval(row) == Some(true)
    }

    /// Three-valued evaluation; `None` is SQL's UNKNOWN
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::And(children) => {
                let mut result = Some(true);
                for child in children {
                    match child.eval(row) {
                        Some(false) => return Some(false),
                        None => result = None,
                        Some(true) => {}
                    }
                }
                result
            }
            Self::Or(children) => {
                let mut result = Some(false);
                for child in children {
                    match child.eval(row) {
                        Some(true) => return Some(true),
                        None => result = None,
                        Some(false) => {}
                    }
                }
                result
            }
            Self::Not(inner) => inner.eval(row).map(|b| !b),
            Self::Compare { field, op, value } => compare(&row.field(*field), *op, value),
            Self::IsNull(field) => Some(row.field(*field).is_null()),
            Self::IsNotNull(field) => Some(!row.field(*field).is_null()),
            Self::FieldEq(left, right) => {
                compare(&row.field(*left), CompareOp::Eq, &row.field(*right))
            }
        }
    }
}

fn compare(actual: &Value, op: CompareOp, expected: &Value) -> Option<bool> {
    if op == CompareOp::StartsWith {
        return match (actual, expected) {
            (Value::Text(a), Value::Text(prefix)) => Some(a.starts_with(prefix.as_str())),
            _ => None,
        };
    }

    let ordering = order_values(actual, expected)?;
    Some(match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
        CompareOp::StartsWith => unreachable!("handled above"),
    })
}

// Mismatched kinds are rejected by `Predicate::validate`; treat them as unknown.
fn order_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
