//! Ordered method + pattern routing and the fixed table route set.

mod router;
mod table;

pub use router::{Route, RouteMatch, Router};
pub use table::{table_routes, Endpoint};
