//! Servicio de autenticación
//!
//! Fachada sobre el login/logout del [`ApiClient`] y lectura del usuario
//! persistido. No valida sesiones: eso lo hace el backend en cada petición.

use tracing::warn;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::auth::{LoginResponse, RegisterData, User, UserRole};
use crate::utils::errors::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

#[derive(serde::Serialize)]
struct RoleQuery<'a> {
    role: &'a str,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.client.login(email, password).await
    }

    /// Igual que [`login`](Self::login) pero trata `success: false` como error y
    /// devuelve directamente el usuario autenticado.
    pub async fn login_user(&self, email: &str, password: &str) -> ApiResult<User> {
        let response = self.login(email, password).await?;
        let has_token = response.token.as_deref().is_some_and(|t| !t.is_empty());
        match (response.success, has_token, response.user) {
            (true, true, Some(user)) => Ok(user),
            _ => Err(ApiError::Status {
                status: 401,
                message: response
                    .message
                    .unwrap_or_else(|| "Credenciales inválidas".to_string()),
            }),
        }
    }

    pub async fn register(&self, data: &RegisterData) -> ApiResult<serde_json::Value> {
        data.validate()?;
        self.client.register(data).await
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.client.logout()
    }

    /// Usuario guardado en el último login; un JSON corrupto cuenta como ausente
    pub fn current_user(&self) -> Option<User> {
        match self.client.session().stored_user::<User>() {
            Ok(user) => user,
            Err(e) => {
                warn!("⚠️ Usuario persistido ilegible: {}", e);
                None
            }
        }
    }

    /// `true` si hay un token persistido
    pub fn is_authenticated(&self) -> bool {
        self.client.session().has_stored_token().unwrap_or(false)
    }

    pub async fn get_users_by_role(&self, role: UserRole) -> ApiResult<Vec<User>> {
        let path = crate::utils::query::with_query(
            "/auth/users-by-role",
            &RoleQuery { role: role.as_str() },
        )?;
        self.client.get(&path).await
    }
}
