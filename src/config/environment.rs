//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente: URL del API, timeout y
//! ubicación del almacenamiento de sesión.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{ApiError, ApiResult};

pub const DEFAULT_API_URL: &str = "http://localhost:4300/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "OptiRouteClient/1.0";

/// Configuración del cliente
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origen del API incluyendo el prefijo `/api`, sin barra final
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Archivo de sesión persistida; `None` usa almacenamiento en memoria
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Configuración apuntando a `api_url` con el resto de valores por defecto
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            ..Self::default()
        }
    }

    /// Cargar desde el entorno (`OPTIROUTE_*`); las variables ausentes toman su
    /// valor por defecto y las mal formadas devuelven [`ApiError::Config`].
    pub fn from_env() -> ApiResult<Self> {
        let api_url = env::var("OPTIROUTE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "OPTIROUTE_API_URL debe ser una URL http(s): '{}'",
                api_url
            )));
        }

        let timeout_secs = parse_or_default("OPTIROUTE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ApiError::Config("OPTIROUTE_TIMEOUT_SECS debe ser mayor que 0".to_string()));
        }

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            timeout: Duration::from_secs(timeout_secs),
            user_agent: env::var("OPTIROUTE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            session_file: env::var("OPTIROUTE_SESSION_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_or_default<T>(key: &str, default: T) -> ApiResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| ApiError::Config(format!("{} inválido: {}", key, err))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_removed() {
        let config = ClientConfig::new("https://optiroute.example.com/api/");
        assert_eq!(config.api_url, "https://optiroute.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.session_file.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let config = ClientConfig::default()
            .with_session_file("/tmp/optiroute-session.json")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/optiroute-session.json"))
        );
    }
}
