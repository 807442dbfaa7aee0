//! Modelos del sistema
//!
//! Formas DTO que el cliente consume y produce. La persistencia vive en el
//! backend; aquí solo se describen los cuerpos JSON (camelCase) del API.

pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod location;
pub mod page;
pub mod route;
pub mod vehicle;

pub use page::{MessageResponse, Page};
