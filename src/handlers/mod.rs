//! HTTP handlers for the table endpoints.

pub mod table;
pub use table::*;
