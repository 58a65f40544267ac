//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("CAST({} AS TEXT)", col)
    }

    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: Option<bool>) -> String {
        // NULLS FIRST/LAST needs SQLite 3.30+, emulate with CASE
        let dir = if desc { "DESC" } else { "ASC" };
        match nulls_last {
            None => format!("{} {}", col, dir),
            Some(true) => format!(
                "CASE WHEN {} IS NULL THEN 1 ELSE 0 END, {} {}",
                col, col, dir
            ),
            Some(false) => format!(
                "CASE WHEN {} IS NULL THEN 0 ELSE 1 END, {} {}",
                col, col, dir
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(5), "?");
    }

    #[test]
    fn test_concat_and_cast() {
        let dialect = SqliteDialect;
        let age = dialect.cast_to_string("m.age");
        assert_eq!(age, "CAST(m.age AS TEXT)");
        assert_eq!(
            dialect.concat(&["m.username", "'_'", &age]),
            "m.username || '_' || CAST(m.age AS TEXT)"
        );
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(SqliteDialect.limit_offset(2, 1), "LIMIT 2 OFFSET 1");
    }

    #[test]
    fn test_order_by_with_nulls() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.order_by_with_nulls("m.age", true, None),
            "m.age DESC"
        );
        assert_eq!(
            dialect.order_by_with_nulls("m.username", false, Some(true)),
            "CASE WHEN m.username IS NULL THEN 1 ELSE 0 END, m.username ASC"
        );
        assert_eq!(
            dialect.order_by_with_nulls("name", true, Some(false)),
            "CASE WHEN name IS NULL THEN 0 ELSE 1 END, name DESC"
        );
    }
}
