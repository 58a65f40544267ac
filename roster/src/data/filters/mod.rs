//! Member search filters
//!
//! Provides the predicate model, the dynamic filter composer and SQL
//! generation for member/team queries.
//!
//! ## Usage
//!
//! ```no_run
//! use roster::data::filters::{MemberQuery, MemberSearchCondition, TeamJoin, compose};
//! use roster::data::sql::SqliteDialect;
//!
//! let condition = MemberSearchCondition::default().team_name("teamB").age_goe(35);
//! let query = MemberQuery::new().join(TeamJoin::Left).filter(compose(&condition));
//! let (sql, params) = query.to_sql(&SqliteDialect, roster::data::filters::Projection::MemberAndTeam);
//! ```

mod compose;
mod condition;
mod error;
mod eval;
mod order;
mod predicate;
mod query;
mod sql;

pub use compose::{age_goe, age_loe, compose, team_name_eq, username_eq};
pub use condition::MemberSearchCondition;
pub use error::FilterError;
pub use eval::Row;
pub use order::{Direction, NullOrdering, OrderSpec, Page};
pub use predicate::{CompareOp, Field, Predicate, Source, Value, ValueKind};
pub use query::{MemberQuery, Projection, TeamJoin};
pub use sql::SqlParams;
