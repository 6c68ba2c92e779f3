//! Discovered schema: column descriptors and the startup catalog.

mod catalog;
mod types;

pub use catalog::SchemaCatalog;
pub use types::*;
