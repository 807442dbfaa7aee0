//! Servicio de ubicaciones
//!
//! Todas las llamadas pasan por el [`ApiClient`], por lo que comparten token y
//! normalización de errores con el resto de servicios.

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::location::{
    CreateLocationData, DefaultLocations, Location, LocationType, UpdateLocationData,
};
use crate::models::MessageResponse;
use crate::services::CrudService;
use crate::utils::errors::ApiResult;

#[derive(Clone)]
pub struct LocationService {
    client: ApiClient,
}

impl LocationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<Location>> {
        self.client.get("/locations").await
    }

    pub async fn get_by_type(&self, location_type: LocationType) -> ApiResult<Vec<Location>> {
        self.client
            .get(&format!("/locations/type/{}", location_type.as_str()))
            .await
    }

    pub async fn get_defaults(&self) -> ApiResult<DefaultLocations> {
        self.client.get("/locations/defaults").await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Location> {
        self.client.get(&format!("/locations/{}", id)).await
    }

    pub async fn create(&self, data: &CreateLocationData) -> ApiResult<Location> {
        data.validate()?;
        let location: Location = self.client.post("/locations", data).await?;
        info!("📍 Ubicación creada: {} ({})", location.name, location.id);
        Ok(location)
    }

    pub async fn update(&self, id: i64, data: &UpdateLocationData) -> ApiResult<Location> {
        self.client.patch(&format!("/locations/{}", id), data).await
    }

    /// Marcar como predeterminada de su tipo (el backend desmarca la anterior)
    pub async fn set_as_default(&self, id: i64) -> ApiResult<Location> {
        self.client
            .patch_empty(&format!("/locations/{}/set-default", id))
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("/locations/{}", id)).await
    }

    /// Crear las ubicaciones predeterminadas en el backend
    pub async fn seed_default(&self) -> ApiResult<()> {
        let _: serde_json::Value = self.client.get("/locations/seed").await?;
        Ok(())
    }
}

#[async_trait]
impl CrudService for LocationService {
    type Entity = Location;
    type Draft = CreateLocationData;

    fn resource_name(&self) -> &'static str {
        "ubicación"
    }

    fn entity_id(entity: &Location) -> i64 {
        entity.id
    }

    fn draft_from(entity: &Location) -> CreateLocationData {
        CreateLocationData::from(entity)
    }

    async fn list(&self) -> ApiResult<Vec<Location>> {
        self.get_all().await
    }

    async fn create_from(&self, draft: &CreateLocationData) -> ApiResult<Location> {
        self.create(draft).await
    }

    async fn update_from(&self, id: i64, draft: &CreateLocationData) -> ApiResult<Location> {
        draft.validate()?;
        self.update(id, &UpdateLocationData::from(draft.clone())).await
    }

    async fn remove(&self, id: i64) -> ApiResult<()> {
        self.delete(id).await.map(|_| ())
    }
}
