//! Cursor-paginated collection
//!
//! This module contains:
//! - The wire shape of one list page
//! - The collector that drains a chain of pages into a single vector
//! - The single retrieval step shared by list and object endpoints

mod collector;
mod page;

pub use collector::{collect_all, collect_all_until, fetch_json};
pub use page::Page;
