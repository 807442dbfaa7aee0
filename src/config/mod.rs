//! Configuración del cliente
//!
//! Este módulo contiene la configuración cargada desde variables de entorno.

pub mod environment;

pub use environment::*;
