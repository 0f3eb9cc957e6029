//! Persistence: the document store, file locations, and legacy migration.

pub mod migrations;
pub mod paths;
pub mod store;
