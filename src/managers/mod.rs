//! Managers operating on the live bookmark document.

pub mod bookmark_manager;
pub mod category_manager;
pub mod move_manager;
