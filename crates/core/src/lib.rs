//! Domain types and rules for the brickshelf set catalog.
//!
//! This crate has no internal dependencies so that the persistence layer,
//! the image collaborator and the shell can all share it.

pub mod completeness;
pub mod edit_session;
pub mod error;
pub mod search;
pub mod set_record;
pub mod types;
pub mod validation;
