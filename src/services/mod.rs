//! Services module
//!
//! Un servicio por recurso del API. Cada servicio traduce operaciones de dominio
//! (listar con filtros, obtener, crear, actualizar, borrar, cambios de estado) en
//! llamadas al [`ApiClient`](crate::client::ApiClient). Los servicios no capturan
//! errores, no reintentan y no cachean: cada llamada es independiente.

pub mod auth_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod location_service;
pub mod route_service;
pub mod seed_service;
pub mod vehicle_service;

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::utils::errors::ApiResult;

pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use employee_service::EmployeeService;
pub use location_service::LocationService;
pub use route_service::RouteService;
pub use seed_service::SeedService;
pub use vehicle_service::VehicleService;

/// Operaciones CRUD comunes que consumen los controladores de página
#[async_trait]
pub trait CrudService: Send + Sync {
    type Entity: Clone + Send + Sync + 'static;
    /// Estado editable del formulario de creación/edición
    type Draft: Clone + Default + PartialEq + Send + Sync + 'static;

    fn resource_name(&self) -> &'static str;
    fn entity_id(entity: &Self::Entity) -> i64;
    fn draft_from(entity: &Self::Entity) -> Self::Draft;

    async fn list(&self) -> ApiResult<Vec<Self::Entity>>;
    async fn create_from(&self, draft: &Self::Draft) -> ApiResult<Self::Entity>;
    async fn update_from(&self, id: i64, draft: &Self::Draft) -> ApiResult<Self::Entity>;
    async fn remove(&self, id: i64) -> ApiResult<()>;
}

/// Todos los servicios construidos sobre un mismo cliente
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub employees: EmployeeService,
    pub vehicles: VehicleService,
    pub routes: RouteService,
    pub locations: LocationService,
    pub dashboard: DashboardService,
    pub seed: SeedService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            employees: EmployeeService::new(client.clone()),
            vehicles: VehicleService::new(client.clone()),
            routes: RouteService::new(client.clone()),
            locations: LocationService::new(client.clone()),
            dashboard: DashboardService::new(client.clone()),
            seed: SeedService::new(client),
        }
    }
}
