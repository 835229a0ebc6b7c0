//! `brickshelf-app` library crate.
//!
//! The catalog service and the interactive shell that drives it. The binary
//! entrypoint lives in `main.rs`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod shell;
