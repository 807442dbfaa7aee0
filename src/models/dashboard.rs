//! Modelos del dashboard de administración
//!
//! Las secciones `employees`, `vehicles` y `routes` de las estadísticas no tienen
//! un esquema fijo en el backend y se conservan como JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    pub total_employees: u64,
    pub active_employees: u64,
    pub total_vehicles: u64,
    pub available_vehicles: u64,
    pub total_routes: u64,
    pub active_routes: u64,
    pub total_capacity: u64,
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Efficiency {
    pub average_optimized_distance: f64,
    pub average_route_time: f64,
    pub optimization_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Savings {
    pub monthly: f64,
    pub annual: f64,
    pub fuel_saved: f64,
    pub time_saved: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Trends {
    pub monthly_routes_average: f64,
    pub employee_growth: String,
    pub vehicle_utilization: String,
    pub cost_reduction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub timestamp: String,
}

impl ActivityItem {
    pub fn kind_label(&self) -> String {
        crate::utils::formatters::activity_type(&self.kind)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub overview: Overview,
    pub employees: serde_json::Value,
    pub vehicles: serde_json::Value,
    pub routes: serde_json::Value,
    pub efficiency: Efficiency,
    pub savings: Savings,
    pub trends: Trends,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationalMetrics {
    pub on_time_performance: f64,
    pub route_efficiency: f64,
    pub vehicle_utilization: f64,
    pub employee_utilization: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMetrics {
    pub cost_per_route: f64,
    pub cost_per_employee: f64,
    pub monthly_savings: f64,
    pub budget_utilization: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityMetrics {
    pub customer_satisfaction: f64,
    pub incident_rate: f64,
    pub delay_rate: f64,
    pub complaint_resolution_time: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub operational: OperationalMetrics,
    pub financial: FinancialMetrics,
    pub quality: QualityMetrics,
}
