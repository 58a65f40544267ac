//! Data storage layer
//!
//! - `filters` - predicate model, dynamic filter composer and query builder
//! - `sql` - SQL dialect abstraction used by the query renderer
//! - `sqlite` - SQLite service, schema, migrations and repositories
//! - `types` - row types and query projections
//! - `traits` - repository trait over the store
//! - `error` - unified error type for the repository surface

pub mod error;
pub mod filters;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::RosterRepository;
