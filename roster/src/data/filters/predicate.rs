//! Predicate AST
//!
//! Pure representation of member/team filters. Holds no SQL and no execution
//! logic; rendering lives in `sql.rs` and in-memory evaluation in `eval.rs`.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use serde::Serialize;

use super::error::FilterError;

// =============================================================================
// Fields
// =============================================================================

/// Table a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Member,
    Team,
}

impl Source {
    /// SQL alias used for this table in generated queries
    pub const fn alias(&self) -> &'static str {
        match self {
            Source::Member => "m",
            Source::Team => "t",
        }
    }
}

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "integer"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// Queryable field of a member or its joined team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl Field {
    pub const fn source(&self) -> Source {
        match self {
            Field::MemberId | Field::Username | Field::Age => Source::Member,
            Field::TeamId | Field::TeamName => Source::Team,
        }
    }

    pub const fn column(&self) -> &'static str {
        match self {
            Field::MemberId | Field::TeamId => "id",
            Field::Username => "username",
            Field::Age => "age",
            Field::TeamName => "name",
        }
    }

    pub const fn kind(&self) -> ValueKind {
        match self {
            Field::MemberId | Field::Age | Field::TeamId => ValueKind::Int,
            Field::Username | Field::TeamName => ValueKind::Text,
        }
    }

    /// Qualified column (e.g. `m.age`)
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.source().alias(), self.column())
    }

    /// Public name used in sort keys and error messages (e.g. `team.name`)
    pub const fn name(&self) -> &'static str {
        match self {
            Field::MemberId => "member.id",
            Field::Username => "member.username",
            Field::Age => "member.age",
            Field::TeamId => "team.id",
            Field::TeamName => "team.name",
        }
    }

    /// Resolve a sort/filter key. Accepts the qualified name or the bare
    /// member column (`age`, `username`).
    pub fn parse(key: &str) -> Option<Field> {
        match key {
            "member.id" | "id" => Some(Field::MemberId),
            "member.username" | "username" => Some(Field::Username),
            "member.age" | "age" => Some(Field::Age),
            "team.id" => Some(Field::TeamId),
            "team.name" | "team" => Some(Field::TeamName),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Values
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Int(_) => Some(ValueKind::Int),
            Value::Text(_) => Some(ValueKind::Text),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// =============================================================================
// Predicates
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    StartsWith,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare {
        field: Field,
        op: CompareOp,
        value: Value,
    },
    IsNull(Field),
    IsNotNull(Field),
    /// Column-to-column equality (theta joins)
    FieldEq(Field, Field),
}

impl Predicate {
    pub fn compare(field: Field, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            field,
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn lt(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    pub fn gt(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    pub fn starts_with(field: Field, prefix: impl Into<String>) -> Self {
        Self::compare(field, CompareOp::StartsWith, Value::Text(prefix.into()))
    }

    /// Inclusive range
    pub fn between(field: Field, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::gte(field, low) & Self::lte(field, high)
    }

    pub const fn is_null(field: Field) -> Self {
        Self::IsNull(field)
    }

    pub const fn is_not_null(field: Field) -> Self {
        Self::IsNotNull(field)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    /// AND together every present predicate.
    ///
    /// Absent entries contribute nothing. No entries yields `True`, a single
    /// entry is returned as-is.
    pub fn all<I>(preds: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        let mut present: Vec<Predicate> = preds.into_iter().flatten().collect();
        match present.len() {
            0 => Self::True,
            1 => present.remove(0),
            _ => Self::And(present),
        }
    }

    /// OR together every present predicate. No entries yields `False`.
    pub fn any<I>(preds: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        let mut present: Vec<Predicate> = preds.into_iter().flatten().collect();
        match present.len() {
            0 => Self::False,
            1 => present.remove(0),
            _ => Self::Or(present),
        }
    }

    /// Visit every field this predicate reads
    pub fn fields(&self) -> Vec<Field> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut Vec<Field>) {
        match self {
            Self::True | Self::False => {}
            Self::And(children) | Self::Or(children) => {
                children.iter().for_each(|c| c.collect_fields(out));
            }
            Self::Not(inner) => inner.collect_fields(out),
            Self::Compare { field, .. } | Self::IsNull(field) | Self::IsNotNull(field) => {
                out.push(*field);
            }
            Self::FieldEq(left, right) => {
                out.push(*left);
                out.push(*right);
            }
        }
    }

    /// True when evaluating this predicate needs the team table joined
    pub fn references_team(&self) -> bool {
        self.fields().iter().any(|f| f.source() == Source::Team)
    }

    /// Check every comparison value against its field kind
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Self::True | Self::False | Self::IsNull(_) | Self::IsNotNull(_) => Ok(()),
            Self::And(children) | Self::Or(children) => {
                children.iter().try_for_each(Predicate::validate)
            }
            Self::Not(inner) => inner.validate(),
            Self::Compare { field, op, value } => {
                if *op == CompareOp::StartsWith && field.kind() != ValueKind::Text {
                    return Err(FilterError::TypeMismatch {
                        field: *field,
                        expected: ValueKind::Text,
                    });
                }
                match value.kind() {
                    Some(kind) if kind != field.kind() => Err(FilterError::TypeMismatch {
                        field: *field,
                        expected: field.kind(),
                    }),
                    _ => Ok(()),
                }
            }
            Self::FieldEq(left, right) => {
                if left.kind() == right.kind() {
                    Ok(())
                } else {
                    Err(FilterError::TypeMismatch {
                        field: *right,
                        expected: left.kind(),
                    })
                }
            }
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self {
            Self::And(mut children) => {
                children.push(rhs);
                Self::And(children)
            }
            lhs => Self::And(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self {
            Self::Or(mut children) => {
                children.push(rhs);
                Self::Or(children)
            }
            lhs => Self::Or(vec![lhs, rhs]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_of_nothing_is_true() {
        assert_eq!(Predicate::all([None, None]), Predicate::True);
    }

    #[test]
    fn all_of_one_is_unwrapped() {
        let p = Predicate::all([None, Some(Predicate::eq(Field::Age, 10)), None]);
        assert_eq!(p, Predicate::eq(Field::Age, 10));
    }

    #[test]
    fn any_of_nothing_is_false() {
        assert_eq!(Predicate::any(Vec::new()), Predicate::False);
    }

    #[test]
    fn bitand_flattens_left_chain() {
        let p = Predicate::eq(Field::Age, 1) & Predicate::eq(Field::Age, 2)
            & Predicate::eq(Field::Age, 3);
        match p {
            Predicate::And(children) => assert_eq!(children.len(), 3),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn between_is_inclusive_pair() {
        assert_eq!(
            Predicate::between(Field::Age, 0, 20),
            Predicate::And(vec![
                Predicate::gte(Field::Age, 0),
                Predicate::lte(Field::Age, 20)
            ])
        );
    }

    #[test]
    fn references_team() {
        assert!(!Predicate::eq(Field::Username, "member1").references_team());
        assert!(Predicate::eq(Field::TeamName, "teamA").references_team());
        assert!(Predicate::FieldEq(Field::Username, Field::TeamName).references_team());
        assert!(
            Predicate::not(Predicate::is_null(Field::TeamId) | Predicate::True).references_team()
        );
    }

    #[test]
    fn validate_rejects_kind_mismatch() {
        let err = Predicate::eq(Field::Age, "ten").validate().unwrap_err();
        assert!(matches!(
            err,
            FilterError::TypeMismatch {
                field: Field::Age,
                expected: ValueKind::Int
            }
        ));
        assert!(Predicate::starts_with(Field::Age, "1").validate().is_err());
        assert!(
            Predicate::FieldEq(Field::Username, Field::TeamId)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_accepts_null_comparisons() {
        assert!(Predicate::eq(Field::Username, Value::Null).validate().is_ok());
        assert!(
            (Predicate::eq(Field::Username, "a") & Predicate::gte(Field::Age, 3))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn field_parse_round_trips_names() {
        for field in [
            Field::MemberId,
            Field::Username,
            Field::Age,
            Field::TeamId,
            Field::TeamName,
        ] {
            assert_eq!(Field::parse(field.name()), Some(field));
        }
        assert_eq!(Field::parse("age"), Some(Field::Age));
        assert_eq!(Field::parse("salary"), None);
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
