//! Servicio de vehículos

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::vehicle::{
    CreateVehicleData, UpdateVehicleData, Vehicle, VehicleFilters, VehicleStats, VehicleStatus,
    VehicleStatusUpdate,
};
use crate::models::{MessageResponse, Page};
use crate::services::CrudService;
use crate::utils::errors::ApiResult;
use crate::utils::query::with_query;

#[derive(Clone)]
pub struct VehicleService {
    client: ApiClient,
}

impl VehicleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, filters: &VehicleFilters) -> ApiResult<Page<Vehicle>> {
        self.client.get(&with_query("/vehicles", filters)?).await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Vehicle> {
        self.client.get(&format!("/vehicles/{}", id)).await
    }

    pub async fn get_available(&self) -> ApiResult<Vec<Vehicle>> {
        self.client.get("/vehicles/available").await
    }

    pub async fn create(&self, data: &CreateVehicleData) -> ApiResult<Vehicle> {
        data.validate()?;
        let vehicle: Vehicle = self.client.post("/vehicles", data).await?;
        info!("🚐 Vehículo creado: {} ({})", vehicle.license_plate, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: i64, data: &UpdateVehicleData) -> ApiResult<Vehicle> {
        data.validate()?;
        self.client.put(&format!("/vehicles/{}", id), data).await
    }

    pub async fn update_status(&self, id: i64, status: VehicleStatus) -> ApiResult<Vehicle> {
        info!("🔧 Vehículo {} -> {}", id, status.as_str());
        self.client
            .patch(&format!("/vehicles/{}/status", id), &VehicleStatusUpdate { status })
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("/vehicles/{}", id)).await
    }

    pub async fn get_statistics(&self) -> ApiResult<VehicleStats> {
        self.client.get("/vehicles/statistics").await
    }

    pub async fn get_providers(&self) -> ApiResult<Vec<String>> {
        self.client.get("/vehicles/providers").await
    }

    /// Vehículos de ejemplo (solo desarrollo)
    pub async fn seed_vehicles(&self) -> ApiResult<serde_json::Value> {
        self.client.post_empty("/vehicles/seed").await
    }
}

#[async_trait]
impl CrudService for VehicleService {
    type Entity = Vehicle;
    type Draft = CreateVehicleData;

    fn resource_name(&self) -> &'static str {
        "vehículo"
    }

    fn entity_id(entity: &Vehicle) -> i64 {
        entity.id
    }

    fn draft_from(entity: &Vehicle) -> CreateVehicleData {
        CreateVehicleData::from(entity)
    }

    async fn list(&self) -> ApiResult<Vec<Vehicle>> {
        Ok(self.get_all(&VehicleFilters::default()).await?.data)
    }

    async fn create_from(&self, draft: &CreateVehicleData) -> ApiResult<Vehicle> {
        self.create(draft).await
    }

    async fn update_from(&self, id: i64, draft: &CreateVehicleData) -> ApiResult<Vehicle> {
        draft.validate()?;
        self.update(id, &UpdateVehicleData::from(draft.clone())).await
    }

    async fn remove(&self, id: i64) -> ApiResult<()> {
        self.delete(id).await.map(|_| ())
    }
}
