//! Shared data types
//!
//! Row types mirror the SQLite tables; projections are read-only shapes
//! produced by queries and never persisted.

mod entities;
mod projections;

pub use entities::{MemberRow, TeamRow};
pub use projections::{
    AgeSummary, MemberDto, MemberTeamDto, MemberTeamTuple, MemberWithTeam, TeamAgeAverage, UserDto,
};
