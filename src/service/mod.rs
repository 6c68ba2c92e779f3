//! CrudService and FieldValidator: generic CRUD driven by the discovered catalog.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{FieldValidator, ValidationOptions};
