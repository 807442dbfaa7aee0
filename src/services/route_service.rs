//! Servicio de rutas
//!
//! CRUD de rutas, cambios de estado y las vistas de conductor y empleado. La
//! optimización ocurre en el backend al crear la ruta.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::route::{
    CompleteStopResponse, CreateRouteData, DriverRoute, Route, RouteFilters, RouteStats,
    RouteStatus, RouteStatusUpdate, StartRouteResponse, UpdateRouteData,
};
use crate::models::{MessageResponse, Page};
use crate::services::CrudService;
use crate::utils::errors::ApiResult;
use crate::utils::query::with_query;

#[derive(serde::Serialize)]
struct LimitQuery {
    limit: Option<u32>,
}

#[derive(serde::Serialize)]
struct DateQuery<'a> {
    date: Option<&'a str>,
}

#[derive(Clone)]
pub struct RouteService {
    client: ApiClient,
}

impl RouteService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, filters: &RouteFilters) -> ApiResult<Page<Route>> {
        self.client.get(&with_query("/routes", filters)?).await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Route> {
        self.client.get(&format!("/routes/{}", id)).await
    }

    /// Crear una ruta; el backend la optimiza y devuelve paradas y métricas
    pub async fn create(&self, data: &CreateRouteData) -> ApiResult<Route> {
        data.validate()?;
        info!(
            "🗺️ Creando ruta '{}' con {} empleados (vehículo {})",
            data.name,
            data.employee_ids.len(),
            data.vehicle_id
        );
        let route: Route = self.client.post("/routes", data).await?;
        info!(
            "✅ Ruta {} optimizada: {:.1} km, {} paradas",
            route.id,
            route.total_distance,
            route.stops.len()
        );
        Ok(route)
    }

    pub async fn update(&self, id: i64, data: &UpdateRouteData) -> ApiResult<Route> {
        self.client.put(&format!("/routes/{}", id), data).await
    }

    pub async fn update_status(&self, id: i64, status: RouteStatus) -> ApiResult<Route> {
        self.client
            .patch(&format!("/routes/{}/status", id), &RouteStatusUpdate { status })
            .await
    }

    /// Cambiar el estado validando antes la transición contra el estado actual
    pub async fn transition(&self, route: &Route, next: RouteStatus) -> ApiResult<Route> {
        route.status.ensure_transition(next)?;
        info!("🔄 Ruta {}: {} -> {}", route.id, route.status.as_str(), next.as_str());
        self.update_status(route.id, next).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("/routes/{}", id)).await
    }

    pub async fn get_statistics(&self) -> ApiResult<RouteStats> {
        self.client.get("/routes/statistics").await
    }

    // Vistas de conductor

    pub async fn get_driver_route(&self, vehicle_id: i64) -> ApiResult<DriverRoute> {
        self.client.get(&format!("/driver/route/{}", vehicle_id)).await
    }

    pub async fn start_route(&self, vehicle_id: i64) -> ApiResult<StartRouteResponse> {
        self.client
            .post_empty(&format!("/driver/route/{}/start", vehicle_id))
            .await
    }

    pub async fn complete_stop(&self, stop_id: i64) -> ApiResult<CompleteStopResponse> {
        self.client
            .post_empty(&format!("/driver/stop/{}/complete", stop_id))
            .await
    }

    pub async fn get_driver_history(&self, vehicle_id: i64, limit: Option<u32>) -> ApiResult<Value> {
        let path = with_query(&format!("/driver/history/{}", vehicle_id), &LimitQuery { limit })?;
        self.client.get(&path).await
    }

    // Vistas de empleado

    pub async fn get_employee_route(&self, employee_id: i64, date: Option<&str>) -> ApiResult<Value> {
        let path = with_query(
            &format!("/employee-view/{}/route", employee_id),
            &DateQuery { date },
        )?;
        self.client.get(&path).await
    }

    pub async fn get_employee_history(&self, employee_id: i64, limit: Option<u32>) -> ApiResult<Value> {
        let path = with_query(
            &format!("/employee-view/{}/history", employee_id),
            &LimitQuery { limit },
        )?;
        self.client.get(&path).await
    }

    pub async fn get_employee_profile(&self, employee_id: i64) -> ApiResult<Value> {
        self.client
            .get(&format!("/employee-view/{}/profile", employee_id))
            .await
    }
}

#[async_trait]
impl CrudService for RouteService {
    type Entity = Route;
    type Draft = CreateRouteData;

    fn resource_name(&self) -> &'static str {
        "ruta"
    }

    fn entity_id(entity: &Route) -> i64 {
        entity.id
    }

    fn draft_from(entity: &Route) -> CreateRouteData {
        let mut employees: Vec<_> = entity.ordered_assignments();
        employees.dedup_by_key(|a| a.employee.id);
        CreateRouteData {
            name: entity.name.clone(),
            date: entity.date.clone(),
            shift: entity.shift,
            home_base: entity.home_base.clone().unwrap_or_default(),
            vehicle_id: entity.vehicle_id,
            employee_ids: employees.iter().map(|a| a.employee.id).collect(),
            home_base_location_id: None,
            destination_location_id: None,
            start_time: entity.start_time.clone(),
            notes: entity.notes.clone(),
        }
    }

    async fn list(&self) -> ApiResult<Vec<Route>> {
        Ok(self.get_all(&RouteFilters::default()).await?.data)
    }

    async fn create_from(&self, draft: &CreateRouteData) -> ApiResult<Route> {
        self.create(draft).await
    }

    async fn update_from(&self, id: i64, draft: &CreateRouteData) -> ApiResult<Route> {
        draft.validate()?;
        self.update(id, &UpdateRouteData::from(draft.clone())).await
    }

    async fn remove(&self, id: i64) -> ApiResult<()> {
        self.delete(id).await.map(|_| ())
    }
}
