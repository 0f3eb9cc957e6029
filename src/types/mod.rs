//! Core data types for the bookmark document model.

pub mod bookmark;
pub mod errors;
