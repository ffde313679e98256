//! View Module
//!
//! Turns the cached release feed into what a single request asks to see.

mod criteria;
mod engine;


pub use criteria::{FilterCriteria, SortOrder, DEFAULT_VERSION};
pub use engine::{derive_view, is_breaking, ReleaseView, BREAKING_CHANGE_MARKER};
