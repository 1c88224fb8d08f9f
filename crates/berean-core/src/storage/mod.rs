//! Storage layer
//!
//! SQLite schema management for the annotation store. The `Store`
//! itself lives in `crate::store`; this module owns table creation and
//! schema versioning.

pub mod schema;

pub use schema::{get_schema_version, init_schema, needs_init, SCHEMA_VERSION};
