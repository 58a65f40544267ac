//! Filter error types

use thiserror::Error;

use super::predicate::{Field, ValueKind};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Search condition exceeds maximum size of {max} bytes")]
    ConditionTooLarge { max: usize },

    #[error("Invalid search condition: {0}")]
    InvalidCondition(#[from] serde_json::Error),

    #[error("Field {field} expects a {expected} value")]
    TypeMismatch { field: Field, expected: ValueKind },

    #[error("Field {0} requires the team table to be joined")]
    MissingJoin(Field),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let err = FilterError::TypeMismatch {
            field: Field::Age,
            expected: ValueKind::Int,
        };
        assert_eq!(err.to_string(), "Field member.age expects a integer value");
    }

    #[test]
    fn test_missing_join_display() {
        let err = FilterError::MissingJoin(Field::TeamName);
        assert_eq!(
            err.to_string(),
            "Field team.name requires the team table to be joined"
        );
    }
}
