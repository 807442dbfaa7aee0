use crate::client::ApiClient;
use crate::models::dashboard::{ActivityItem, DashboardStats, PerformanceMetrics};
use crate::utils::errors::ApiResult;

/// Servicio del dashboard de administración
#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_stats(&self) -> ApiResult<DashboardStats> {
        self.client.get("/dashboard/stats").await
    }

    pub async fn get_performance_metrics(&self) -> ApiResult<PerformanceMetrics> {
        self.client.get("/dashboard/performance").await
    }

    pub async fn get_recent_activity(&self) -> ApiResult<Vec<ActivityItem>> {
        self.client.get("/dashboard/activity").await
    }
}
