//! Servicio de empleados

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::employee::{
    CreateEmployeeData, Employee, EmployeeFilters, EmployeeStats, UpdateEmployeeData,
};
use crate::models::{MessageResponse, Page};
use crate::services::CrudService;
use crate::utils::errors::ApiResult;
use crate::utils::query::with_query;

#[derive(Clone)]
pub struct EmployeeService {
    client: ApiClient,
}

impl EmployeeService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, filters: &EmployeeFilters) -> ApiResult<Page<Employee>> {
        self.client.get(&with_query("/employees", filters)?).await
    }

    pub async fn get_by_id(&self, id: i64) -> ApiResult<Employee> {
        self.client.get(&format!("/employees/{}", id)).await
    }

    pub async fn create(&self, data: &CreateEmployeeData) -> ApiResult<Employee> {
        data.validate()?;
        let employee: Employee = self.client.post("/employees", data).await?;
        info!("👤 Empleado creado: {} ({})", employee.display_name(), employee.id);
        Ok(employee)
    }

    pub async fn update(&self, id: i64, data: &UpdateEmployeeData) -> ApiResult<Employee> {
        self.client.put(&format!("/employees/{}", id), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("/employees/{}", id)).await
    }

    pub async fn get_statistics(&self) -> ApiResult<EmployeeStats> {
        self.client.get("/employees/statistics").await
    }

    pub async fn get_departments(&self) -> ApiResult<Vec<String>> {
        self.client.get("/employees/departments").await
    }

    /// Empleados de ejemplo (solo desarrollo)
    pub async fn seed_employees(&self) -> ApiResult<serde_json::Value> {
        self.client.post_empty("/employees/seed").await
    }
}

#[async_trait]
impl CrudService for EmployeeService {
    type Entity = Employee;
    type Draft = CreateEmployeeData;

    fn resource_name(&self) -> &'static str {
        "empleado"
    }

    fn entity_id(entity: &Employee) -> i64 {
        entity.id
    }

    fn draft_from(entity: &Employee) -> CreateEmployeeData {
        CreateEmployeeData::from(entity)
    }

    async fn list(&self) -> ApiResult<Vec<Employee>> {
        Ok(self.get_all(&EmployeeFilters::default()).await?.data)
    }

    async fn create_from(&self, draft: &CreateEmployeeData) -> ApiResult<Employee> {
        self.create(draft).await
    }

    async fn update_from(&self, id: i64, draft: &CreateEmployeeData) -> ApiResult<Employee> {
        draft.validate()?;
        self.update(id, &UpdateEmployeeData::from(draft.clone())).await
    }

    async fn remove(&self, id: i64) -> ApiResult<()> {
        self.delete(id).await.map(|_| ())
    }
}
