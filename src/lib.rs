//! OptiRoute client
//!
//! Núcleo cliente del planificador de rutas de transporte de empleados: cliente
//! HTTP autenticado, servicios tipados por recurso, sesión persistente y estado
//! reactivo para las vistas.

pub mod client;
pub mod config;
pub mod controllers;
pub mod hooks;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use session::Session;
pub use utils::errors::{ApiError, ApiResult};
