//! Ordering and paging modifiers

use super::error::FilterError;
use super::predicate::Field;
use crate::data::sql::SqlDialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Placement of NULLs; `Default` leaves it to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrdering {
    #[default]
    Default,
    First,
    Last,
}

/// One sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: Field,
    pub direction: Direction,
    pub nulls: NullOrdering,
}

impl OrderSpec {
    pub const fn asc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Asc,
            nulls: NullOrdering::Default,
        }
    }

    pub const fn desc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Desc,
            nulls: NullOrdering::Default,
        }
    }

    pub const fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    pub const fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }

    /// Parse a sort key such as `age:desc` or `username:asc:nulls_last`
    pub fn parse(key: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidSortKey(key.to_string());
        let mut parts = key.split(':');
        let field = parts
            .next()
            .and_then(|f| Field::parse(f.trim()))
            .ok_or_else(invalid)?;

        let mut spec = Self::asc(field);
        for part in parts {
            match part.trim().to_lowercase().as_str() {
                "asc" => spec.direction = Direction::Asc,
                "desc" => spec.direction = Direction::Desc,
                "nulls_first" => spec.nulls = NullOrdering::First,
                "nulls_last" => spec.nulls = NullOrdering::Last,
                _ => return Err(invalid()),
            }
        }
        Ok(spec)
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        let nulls_last = match self.nulls {
            NullOrdering::Default => None,
            NullOrdering::First => Some(false),
            NullOrdering::Last => Some(true),
        };
        dialect.order_by_with_nulls(
            &self.field.qualified(),
            self.direction == Direction::Desc,
            nulls_last,
        )
    }
}

/// Offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::SqliteDialect;

    #[test]
    fn parse_sort_keys() {
        assert_eq!(OrderSpec::parse("age").unwrap(), OrderSpec::asc(Field::Age));
        assert_eq!(
            OrderSpec::parse("age:desc").unwrap(),
            OrderSpec::desc(Field::Age)
        );
        assert_eq!(
            OrderSpec::parse("member.username:asc:nulls_last").unwrap(),
            OrderSpec::asc(Field::Username).nulls_last()
        );
        assert_eq!(
            OrderSpec::parse("team.name:DESC:nulls_first").unwrap(),
            OrderSpec::desc(Field::TeamName).nulls_first()
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(matches!(
            OrderSpec::parse("salary"),
            Err(FilterError::InvalidSortKey(_))
        ));
        assert!(OrderSpec::parse("age:sideways").is_err());
    }

    #[test]
    fn render_order() {
        assert_eq!(
            OrderSpec::desc(Field::Age).to_sql(&SqliteDialect),
            "m.age DESC"
        );
        assert_eq!(
            OrderSpec::asc(Field::Username)
                .nulls_last()
                .to_sql(&SqliteDialect),
            "CASE WHEN m.username IS NULL THEN 1 ELSE 0 END, m.username ASC"
        );
    }
}
