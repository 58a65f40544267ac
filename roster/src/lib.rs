//! Member and team roster backed by SQLite
//!
//! `data::filters` builds dynamic member queries from optional search
//! criteria; `data::sqlite` executes them. `core` wires configuration,
//! storage and the command line together.

mod app;
pub mod core;
pub mod data;
