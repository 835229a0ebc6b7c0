//! Row types decoded from the catalog table.
//!
//! - [`set_row::SetRow`] adapts a `legos` row into the domain
//!   [`SetRecord`](brickshelf_core::set_record::SetRecord)
//! - [`stats`] holds the aggregate statistics returned by `StatsRepo`

pub mod set_row;
pub mod stats;
