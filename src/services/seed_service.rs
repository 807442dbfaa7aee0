use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::utils::errors::ApiResult;

/// Datos de ejemplo para desarrollo y pruebas
#[derive(Clone)]
pub struct SeedService {
    client: ApiClient,
}

impl SeedService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn initialize_all(&self) -> ApiResult<Value> {
        info!("🌱 Inicializando datos de ejemplo");
        self.client.post_empty("/seed/all").await
    }

    pub async fn create_users(&self) -> ApiResult<Value> {
        self.client.post_empty("/seed/users").await
    }

    pub async fn create_employees(&self) -> ApiResult<Value> {
        self.client.post_empty("/seed/employees").await
    }

    pub async fn create_vehicles(&self) -> ApiResult<Value> {
        self.client.post_empty("/seed/vehicles").await
    }
}
