//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Store` as the first argument and open one connection per call.

pub mod set_repo;
pub mod stats_repo;

pub use set_repo::SetRepo;
pub use stats_repo::StatsRepo;
