//! SQL abstraction layer
//!
//! Dialect-specific syntax used by the query renderer. Only SQLite is wired
//! up as a backend; the renderer itself goes through [`SqlDialect`].

mod dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use sqlite_dialect::SqliteDialect;
