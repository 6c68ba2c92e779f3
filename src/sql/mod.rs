//! SQL builder: identifiers from the discovered catalog, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
