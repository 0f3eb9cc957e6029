//! SuiteView bookmarks — the data core behind the SuiteView bookmark bars.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod managers;
pub mod platform;
pub mod storage;
pub mod types;
