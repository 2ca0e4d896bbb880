//! Domain layer - pure conversation and search logic.
//!
//! No network I/O lives here; external collaborators are reached only
//! through the traits in [`crate::ports`].

pub mod catalog;
pub mod dialogue;
pub mod foundation;
pub mod resolver;
pub mod search;
