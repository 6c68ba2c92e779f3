//! DB Explorer: schema-driven HTTP CRUD over every table of a database.

pub mod driver;
pub mod error;
pub mod explorer;
pub mod handlers;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod value;

pub use driver::{Driver, PgDriver};
pub use error::{AppError, StartupError};
pub use explorer::Explorer;
pub use pagination::{parse_int_param, Pagination};
pub use response::{error_body, success};
pub use routes::{table_routes, Endpoint, Router};
pub use schema::{ColumnDescriptor, SchemaCatalog, SemanticType};
pub use service::{CrudService, FieldValidator, ValidationOptions};
pub use settings::Settings;
pub use state::AppState;
pub use value::{FieldMap, FieldValue, Record};
