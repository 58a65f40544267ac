//! SQL dialect trait
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - NULL ordering in ORDER BY
/// - String concatenation and casting
/// - Limit/offset clauses
pub trait SqlDialect: Send + Sync {
    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Generate LIMIT/OFFSET clause
    ///
    /// Most databases use `LIMIT x OFFSET y`, but syntax may vary.
    fn limit_offset(&self, limit: u32, offset: u32) -> String {
        format!("LIMIT {} OFFSET {}", limit, offset)
    }

    /// Cast a column to string type
    ///
    /// - SQLite: `CAST(col AS TEXT)`
    /// - PostgreSQL: `col::TEXT`
    fn cast_to_string(&self, col: &str) -> String;

    /// Concatenate string expressions
    ///
    /// Defaults to the standard `||` operator.
    fn concat(&self, parts: &[&str]) -> String {
        parts.join(" || ")
    }

    /// Generate one ORDER BY key with NULL handling
    ///
    /// `nulls_last`: `None` keeps the database default ordering of NULLs.
    ///
    /// - Most: `col DESC NULLS LAST`
    /// - Older SQLite: emulated with a CASE prefix key
    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: Option<bool>) -> String;
}
