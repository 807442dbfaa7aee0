//! Sistema de manejo de errores
//!
//! Todos los fallos del cliente (transporte, estado HTTP, JSON, almacenamiento de
//! sesión, validación local) se normalizan en [`ApiError`], cuyo mensaje es legible
//! por el usuario final.

use thiserror::Error;

/// Mensaje usado cuando un error no trae texto propio
pub const DEFAULT_ERROR_MESSAGE: &str = "Error desconocido";

/// Errores principales del cliente
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// La petición no llegó a completarse (DNS, conexión rechazada, timeout...)
    #[error("{0}")]
    Network(String),

    /// El servidor respondió con un estado distinto de 2xx
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Cuerpo de respuesta exitosa que no es el JSON esperado
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("Error de almacenamiento de sesión: {0}")]
    Storage(String),

    #[error("Datos inválidos: {0}")]
    Validation(String),

    #[error("Transición de estado inválida: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Configuración inválida: {0}")]
    Config(String),
}

/// Resultado tipado para operaciones del cliente
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Mensaje humano del error, o [`DEFAULT_ERROR_MESSAGE`] si está vacío
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Código HTTP asociado, si el error viene de una respuesta del servidor
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Construye el error de una respuesta no-2xx a partir de su cuerpo crudo.
    ///
    /// Usa el campo `message` del JSON si existe y no está vacío; en cualquier otro
    /// caso (cuerpo vacío, no-JSON, sin `message`) cae en `"Error {status}"`.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(message_text))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Error {}", status));

        ApiError::Status { status, message }
    }
}

/// Texto de un campo `message`: cadena tal cual, listas unidas con `", "`
fn message_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network(format!("Tiempo de espera agotado: {}", err))
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(format!("Error de red: {}", err))
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{} ({})", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        ApiError::Validation(fields.join("; "))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Función helper para crear errores de validación local
pub fn validation_error(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}
