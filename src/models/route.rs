//! Modelo de Route
//!
//! Ruta planificada: vehículo, paradas ordenadas, asignaciones de empleados y
//! métricas agregadas calculadas por el backend de optimización.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::employee::Employee;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{ApiError, ApiResult};
use crate::utils::search::Searchable;
use crate::utils::validation::{validate_date, validate_not_blank, validate_time};

/// Estado de la ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "planned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "Planificada",
            RouteStatus::InProgress => "En Progreso",
            RouteStatus::Completed => "Completada",
            RouteStatus::Cancelled => "Cancelada",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RouteStatus::Completed | RouteStatus::Cancelled)
    }

    /// `planned → in_progress → completed`; `cancelled` desde cualquier estado no terminal
    pub fn can_transition_to(&self, next: RouteStatus) -> bool {
        matches!(
            (self, next),
            (RouteStatus::Planned, RouteStatus::InProgress)
                | (RouteStatus::InProgress, RouteStatus::Completed)
                | (RouteStatus::Planned, RouteStatus::Cancelled)
                | (RouteStatus::InProgress, RouteStatus::Cancelled)
        )
    }

    pub fn ensure_transition(&self, next: RouteStatus) -> ApiResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(ApiError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

/// Franja horaria de operación
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Mañana",
            Shift::Afternoon => "Tarde",
            Shift::Evening => "Noche",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    Pickup,
    Destination,
    Waypoint,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub order: u32,
    #[serde(rename = "type")]
    pub stop_type: StopType,
    #[serde(default)]
    pub estimated_arrival: Option<String>,
    #[serde(default)]
    pub actual_arrival: Option<String>,
    /// Kilómetros desde la parada anterior
    #[serde(default)]
    pub distance_from_previous: f64,
    /// Minutos desde la parada anterior
    #[serde(default)]
    pub duration_from_previous: f64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteAssignment {
    pub id: i64,
    pub employee: Employee,
    pub pickup_order: u32,
    #[serde(default)]
    pub estimated_pickup_time: Option<String>,
    #[serde(default)]
    pub actual_pickup_time: Option<String>,
    #[serde(default)]
    pub is_picked_up: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub shift: Shift,
    #[serde(default)]
    pub home_base: Option<String>,
    pub status: RouteStatus,
    #[serde(default)]
    pub total_distance: f64,
    /// Minutos
    #[serde(default)]
    pub estimated_duration: f64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    pub vehicle_id: i64,
    #[serde(default)]
    pub assignments: Vec<RouteAssignment>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Route {
    /// Paradas ordenadas por `order`
    pub fn ordered_stops(&self) -> Vec<&RouteStop> {
        let mut stops: Vec<&RouteStop> = self.stops.iter().collect();
        stops.sort_by_key(|s| s.order);
        stops
    }

    /// Asignaciones ordenadas por orden de recogida
    pub fn ordered_assignments(&self) -> Vec<&RouteAssignment> {
        let mut assignments: Vec<&RouteAssignment> = self.assignments.iter().collect();
        assignments.sort_by_key(|a| a.pickup_order);
        assignments
    }

    pub fn assignment_for(&self, employee_id: i64) -> Option<&RouteAssignment> {
        self.assignments.iter().find(|a| a.employee.id == employee_id)
    }

    /// Primera parada no completada, en orden
    pub fn next_pending_stop(&self) -> Option<&RouteStop> {
        self.ordered_stops().into_iter().find(|s| !s.is_completed)
    }

    /// Fracción de paradas completadas (0.0 si no hay paradas)
    pub fn progress(&self) -> f64 {
        if self.stops.is_empty() {
            return 0.0;
        }
        let done = self.stops.iter().filter(|s| s.is_completed).count();
        done as f64 / self.stops.len() as f64
    }

    /// `true` si hay más asignaciones que plazas en el vehículo cargado
    pub fn exceeds_capacity(&self) -> bool {
        self.vehicle
            .as_ref()
            .map(|v| ensure_capacity(self.assignments.len(), v.capacity).is_err())
            .unwrap_or(false)
    }
}

impl Searchable for Route {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone()];
        if let Some(vehicle) = &self.vehicle {
            fields.push(vehicle.model.clone());
            fields.push(vehicle.license_plate.clone());
        }
        fields
    }
}

/// El número de pasajeros asignados no puede superar la capacidad del vehículo
pub fn ensure_capacity(assigned: usize, capacity: u32) -> ApiResult<()> {
    if assigned > capacity as usize {
        return Err(ApiError::Validation(format!(
            "{} empleados asignados superan la capacidad del vehículo ({})",
            assigned, capacity
        )));
    }
    Ok(())
}

/// Datos para crear (y optimizar) una ruta
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteData {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_date")]
    pub date: String,
    pub shift: Shift,
    pub home_base: String,
    #[validate(range(min = 1))]
    pub vehicle_id: i64,
    #[validate(length(min = 1))]
    pub employee_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_base_location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_location_id: Option<i64>,
    #[validate(custom = "validate_time")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Actualización parcial de una ruta
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_base_location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<CreateRouteData> for UpdateRouteData {
    fn from(data: CreateRouteData) -> Self {
        Self {
            name: Some(data.name),
            date: Some(data.date),
            shift: Some(data.shift),
            home_base: Some(data.home_base),
            vehicle_id: Some(data.vehicle_id),
            employee_ids: Some(data.employee_ids),
            home_base_location_id: data.home_base_location_id,
            destination_location_id: data.destination_location_id,
            start_time: data.start_time,
            notes: data.notes,
        }
    }
}

/// Filtros para el listado de rutas
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilters {
    pub status: Option<String>,
    pub date: Option<String>,
    pub shift: Option<String>,
    pub vehicle_id: Option<i64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStatusUpdate {
    pub status: RouteStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRouteCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub total: u64,
    pub planned: u64,
    pub in_progress: u64,
    pub completed: u64,
    #[serde(default)]
    pub monthly_stats: Vec<MonthlyRouteCount>,
}

/// Vista de conductor: la ruta activa del vehículo con su progreso
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverRoute {
    #[serde(flatten)]
    pub route: Route,
    #[serde(default)]
    pub progress: serde_json::Value,
    #[serde(default)]
    pub current_stop: Option<RouteStop>,
    #[serde(default)]
    pub next_stop: Option<RouteStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartRouteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub route: Route,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteStopResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub route_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_route() -> serde_json::Value {
        json!({
            "id": 10,
            "name": "Ruta Norte",
            "date": "2025-03-14",
            "shift": "morning",
            "status": "planned",
            "totalDistance": 18.4,
            "estimatedDuration": 52,
            "estimatedCost": 85000,
            "vehicleId": 3,
            "vehicle": {
                "id": 3, "licensePlate": "ABC123", "model": "Sprinter", "brand": "Mercedes",
                "capacity": 1, "type": "van", "status": "available"
            },
            "stops": [
                {"id": 2, "name": "Oficina", "order": 2, "type": "destination"},
                {"id": 1, "name": "Juan", "order": 1, "type": "pickup", "isCompleted": true}
            ],
            "assignments": [
                {"id": 5, "pickupOrder": 2, "employee": {"id": 2, "firstName": "Ana", "lastName": "Gómez", "email": "ana@x.co", "status": "active"}},
                {"id": 4, "pickupOrder": 1, "employee": {"id": 1, "firstName": "Juan", "lastName": "Pérez", "email": "juan@x.co", "status": "active"}}
            ]
        })
    }

    #[test]
    fn status_transitions_follow_lifecycle() {
        use RouteStatus::*;
        assert!(Planned.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Planned.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));

        assert!(!Planned.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Planned));
        assert!(!InProgress.can_transition_to(InProgress));

        let err = Completed.ensure_transition(InProgress).unwrap_err();
        assert_eq!(
            err,
            ApiError::InvalidTransition {
                from: "completed".into(),
                to: "in_progress".into()
            }
        );
    }

    #[test]
    fn route_orders_stops_and_assignments() {
        let route: Route = serde_json::from_value(sample_route()).unwrap();
        let stops: Vec<i64> = route.ordered_stops().iter().map(|s| s.id).collect();
        assert_eq!(stops, vec![1, 2]);
        let pickups: Vec<i64> = route
            .ordered_assignments()
            .iter()
            .map(|a| a.employee.id)
            .collect();
        assert_eq!(pickups, vec![1, 2]);
        assert_eq!(route.next_pending_stop().unwrap().id, 2);
        assert!((route.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(route.assignment_for(2).unwrap().id, 5);
    }

    #[test]
    fn capacity_invariant_is_checked() {
        let route: Route = serde_json::from_value(sample_route()).unwrap();
        assert!(route.exceeds_capacity());
        assert!(ensure_capacity(3, 3).is_ok());
        assert!(ensure_capacity(4, 3).is_err());
    }

    #[test]
    fn driver_route_flattens_route_fields() {
        let mut raw = sample_route();
        raw["progress"] = json!({"completed": 1, "total": 2});
        raw["nextStop"] = json!({"id": 2, "order": 2, "type": "destination"});
        let driver: DriverRoute = serde_json::from_value(raw).unwrap();
        assert_eq!(driver.route.name, "Ruta Norte");
        assert_eq!(driver.next_stop.unwrap().id, 2);
        assert!(driver.current_stop.is_none());
        assert_eq!(driver.progress["total"], 2);
    }

    #[test]
    fn create_data_requires_employees_and_valid_date() {
        let data = CreateRouteData {
            name: "Ruta".into(),
            date: "14-03-2025".into(),
            home_base: "main".into(),
            vehicle_id: 3,
            employee_ids: vec![],
            start_time: Some("07:00".into()),
            ..Default::default()
        };
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("employee_ids"));
        assert!(!fields.contains_key("start_time"));
    }
}
