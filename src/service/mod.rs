//! CrudService: generic CRUD over document collections.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
