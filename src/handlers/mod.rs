//! HTTP handlers for model CRUD.

pub mod model;
pub use model::*;
