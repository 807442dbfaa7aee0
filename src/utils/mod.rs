//! Utilidades del cliente
//!
//! Manejo de errores, construcción de query strings, formateadores y
//! búsqueda local sobre listados.

pub mod errors;
pub mod formatters;
pub mod query;
pub mod search;
pub mod validation;

pub use errors::{ApiError, ApiResult};
