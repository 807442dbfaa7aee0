//! Cliente HTTP del API de OptiRoute
//!
//! Único punto de comunicación saliente: construye URLs sobre la base
//! configurada, adjunta el token bearer de la [`Session`], serializa cuerpos
//! JSON y normaliza cualquier fallo en un [`ApiError`] con mensaje legible.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::environment::ClientConfig;
use crate::models::auth::{LoginRequest, LoginResponse, RegisterData};
use crate::session::{FileStorage, MemoryStorage, Session, SessionStorage};
use crate::utils::errors::{ApiError, ApiResult};

/// Opciones de una petición individual
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Cuerpo ya serializado como JSON
    pub body: Option<String>,
    /// Cabeceras adicionales; prevalecen sobre las cabeceras por defecto
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serializa `body` como JSON
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: &str, value: &str) -> ApiResult<Self> {
        let invalid = |e: &dyn std::fmt::Display| {
            ApiError::Validation(format!("cabecera {} inválida: {}", name, e))
        };
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
        self.headers.insert(header, value);
        Ok(self)
    }
}

/// Cliente HTTP compartido por todos los servicios.
///
/// Clonar el cliente es barato y todas las copias comparten conexión y sesión.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    user_agent: Arc<str>,
    session: Session,
}

impl ApiClient {
    /// Crear cliente con una sesión existente
    pub fn new(config: &ClientConfig, session: Session) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("no se pudo crear el cliente HTTP: {}", e)))?;

        info!("🌐 Cliente OptiRoute apuntando a {}", config.api_url);

        Ok(Self {
            http,
            base_url: Arc::from(config.api_url.trim_end_matches('/')),
            user_agent: Arc::from(config.user_agent.as_str()),
            session,
        })
    }

    /// Crear cliente y sesión a partir de la configuración: archivo de sesión si
    /// `session_file` está definido, memoria en caso contrario.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::new(config, Session::new(storage))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL absoluta de un endpoint relativo (`/employees`)
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    fn default_headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(agent) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, agent);
        }
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Storage("token de sesión con caracteres inválidos".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Ejecutar una petición y decodificar la respuesta JSON.
    ///
    /// Un cuerpo exitoso vacío se decodifica como `null`, lo que permite usar
    /// `()` u `Option<_>` como tipo de respuesta.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = self.url(endpoint);
        let mut headers = self.default_headers()?;
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        debug!("📤 {} {}", options.method, url);

        let mut builder = self.http.request(options.method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("❌ API Error - {}: {}", endpoint, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("❌ API Error - {}: cuerpo ilegible: {}", endpoint, e);
            ApiError::from(e)
        })?;

        debug!("📡 {} {} -> {}", options.method, endpoint, status);

        if !status.is_success() {
            let err = ApiError::from_status_body(status.as_u16(), &text);
            warn!("⚠️ API Error - {}: {}", endpoint, err);
            return Err(err);
        }

        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(payload).map_err(|e| {
            error!("❌ API Error - {}: JSON inválido: {}", endpoint, e);
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(endpoint, RequestOptions::new(Method::POST).json(body)?)
            .await
    }

    /// POST sin cuerpo
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::POST)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(endpoint, RequestOptions::new(Method::PUT).json(body)?)
            .await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(endpoint, RequestOptions::new(Method::PATCH).json(body)?)
            .await
    }

    /// PATCH sin cuerpo
    pub async fn patch_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::PATCH)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(endpoint, RequestOptions::new(Method::DELETE)).await
    }

    /// Iniciar sesión.
    ///
    /// Si el backend responde `success` con token, se persisten token y usuario y
    /// las siguientes peticiones llevan `Authorization: Bearer`. Un error de red
    /// o de estado se propaga sin tocar la sesión almacenada.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        info!("🔐 Iniciando sesión para {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/auth/login", &request).await?;

        match response.token.as_deref() {
            Some(token) if response.success && !token.is_empty() => {
                self.session.set_token(token, &response.user)?;
                info!("✅ Sesión iniciada para {}", email);
            }
            _ => warn!("⚠️ Login sin token para {}", email),
        }

        Ok(response)
    }

    pub async fn register(&self, data: &RegisterData) -> ApiResult<serde_json::Value> {
        self.post("/auth/register", data).await
    }

    /// Cerrar sesión localmente (sin llamada de red)
    pub fn logout(&self) -> ApiResult<()> {
        info!("🚪 Cerrando sesión");
        self.session.clear_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::new("http://localhost:4300/api/"), Session::in_memory()).unwrap()
    }

    #[test]
    fn builds_urls_relative_to_base() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:4300/api");
        assert_eq!(client.url("/employees"), "http://localhost:4300/api/employees");
        assert_eq!(client.url("vehicles/3"), "http://localhost:4300/api/vehicles/3");
    }

    #[test]
    fn authorization_header_follows_session() {
        let client = client();
        assert!(client.default_headers().unwrap().get(AUTHORIZATION).is_none());

        client
            .session()
            .set_token("abc", &serde_json::json!({"id": 1}))
            .unwrap();
        let headers = client.default_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");

        client.logout().unwrap();
        assert!(client.default_headers().unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn request_options_serialize_body() {
        let options = RequestOptions::new(Method::PATCH)
            .json(&serde_json::json!({"status": "maintenance"}))
            .unwrap()
            .header("x-request-source", "cli")
            .unwrap();
        assert_eq!(options.body.as_deref(), Some(r#"{"status":"maintenance"}"#));
        assert_eq!(options.headers.get("x-request-source").unwrap(), "cli");
    }
}
