//! Planificación de rutas
//!
//! Selección de empleados activos y de un vehículo disponible, validación de
//! capacidad y envío al backend, que devuelve la ruta ya optimizada.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::hooks::Resource;
use crate::models::employee::{Employee, EmployeeFilters};
use crate::models::location::{Location, LocationType};
use crate::models::route::{ensure_capacity, CreateRouteData, Route, Shift};
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::services::Services;
use crate::utils::errors::{validation_error, ApiResult};

pub const DEFAULT_HOME_BASE: &str = "main";
pub const DEFAULT_START_TIME: &str = "07:00";

/// Comprueba que hay empleados y vehículo, y que caben en el vehículo
pub fn validate_selection(employee_ids: &[i64], vehicle: Option<&Vehicle>) -> ApiResult<()> {
    let vehicle = match vehicle {
        Some(vehicle) if !employee_ids.is_empty() => vehicle,
        _ => return Err(validation_error("Por favor selecciona empleados y un vehículo")),
    };
    ensure_capacity(employee_ids.len(), vehicle.capacity)
}

/// Nombre por defecto: `Ruta dd/mm/yyyy`
pub fn default_route_name(date: NaiveDate) -> String {
    format!("Ruta {}", date.format("%d/%m/%Y"))
}

pub struct PlanRouteController {
    services: Services,
    employees: Resource<Vec<Employee>>,
    vehicles: Resource<Vec<Vehicle>>,
    home_bases: Resource<Vec<Location>>,
    offices: Resource<Vec<Location>>,
    selected_employees: Vec<i64>,
    vehicle_id: Option<i64>,
    home_base_location_id: Option<i64>,
    destination_location_id: Option<i64>,
    name: String,
    date: NaiveDate,
    shift: Shift,
    start_time: String,
    optimized: Option<Route>,
}

impl PlanRouteController {
    pub fn new(services: Services) -> Self {
        let employees = {
            let service = services.employees.clone();
            Resource::new(move || {
                let service = service.clone();
                async move { service.get_all(&EmployeeFilters::default()).await.map(|page| page.data) }
            })
        };
        let vehicles = {
            let service = services.vehicles.clone();
            Resource::new(move || {
                let service = service.clone();
                async move { service.get_all(&VehicleFilters::default()).await.map(|page| page.data) }
            })
        };
        let home_bases = {
            let service = services.locations.clone();
            Resource::new(move || {
                let service = service.clone();
                async move { service.get_by_type(LocationType::HomeBase).await }
            })
        };
        let offices = {
            let service = services.locations.clone();
            Resource::new(move || {
                let service = service.clone();
                async move { service.get_by_type(LocationType::Office).await }
            })
        };

        Self {
            services,
            employees,
            vehicles,
            home_bases,
            offices,
            selected_employees: Vec::new(),
            vehicle_id: None,
            home_base_location_id: None,
            destination_location_id: None,
            name: String::new(),
            date: Local::now().date_naive(),
            shift: Shift::Morning,
            start_time: DEFAULT_START_TIME.to_string(),
            optimized: None,
        }
    }

    /// Cargar empleados, vehículos y ubicaciones en paralelo
    pub async fn load(&self) {
        tokio::join!(
            self.employees.mount(),
            self.vehicles.mount(),
            self.home_bases.mount(),
            self.offices.mount(),
        );
    }

    /// Primer error de carga, si lo hay
    pub fn load_error(&self) -> Option<String> {
        [
            self.employees.error(),
            self.vehicles.error(),
            self.home_bases.error(),
            self.offices.error(),
        ]
        .into_iter()
        .flatten()
        .next()
    }

    pub fn active_employees(&self) -> Vec<Employee> {
        self.employees
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(Employee::is_active)
            .collect()
    }

    pub fn available_vehicles(&self) -> Vec<Vehicle> {
        self.vehicles
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(Vehicle::is_available)
            .collect()
    }

    pub fn home_bases(&self) -> Vec<Location> {
        self.home_bases.data().unwrap_or_default()
    }

    pub fn offices(&self) -> Vec<Location> {
        self.offices.data().unwrap_or_default()
    }

    /// Marcar o desmarcar un empleado; invalida cualquier ruta ya optimizada
    pub fn toggle_employee(&mut self, employee_id: i64) {
        match self.selected_employees.iter().position(|id| *id == employee_id) {
            Some(index) => {
                self.selected_employees.remove(index);
            }
            None => self.selected_employees.push(employee_id),
        }
        self.optimized = None;
    }

    pub fn selected_employees(&self) -> &[i64] {
        &self.selected_employees
    }

    pub fn select_vehicle(&mut self, vehicle_id: i64) {
        self.vehicle_id = Some(vehicle_id);
    }

    pub fn select_home_base(&mut self, location_id: Option<i64>) {
        self.home_base_location_id = location_id;
    }

    pub fn select_destination(&mut self, location_id: Option<i64>) {
        self.destination_location_id = location_id;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_shift(&mut self, shift: Shift) {
        self.shift = shift;
    }

    pub fn set_start_time(&mut self, start_time: impl Into<String>) {
        self.start_time = start_time.into();
    }

    pub fn selected_vehicle(&self) -> Option<Vehicle> {
        let id = self.vehicle_id?;
        self.available_vehicles().into_iter().find(|v| v.id == id)
    }

    /// Empleados seleccionados por encima de la capacidad del vehículo
    pub fn over_capacity(&self) -> bool {
        self.selected_vehicle()
            .map(|v| self.selected_employees.len() > v.capacity as usize)
            .unwrap_or(false)
    }

    pub fn validate(&self) -> ApiResult<()> {
        validate_selection(&self.selected_employees, self.selected_vehicle().as_ref())
    }

    /// Datos de creación con los valores por defecto aplicados
    pub fn route_data(&self) -> ApiResult<CreateRouteData> {
        self.validate()?;
        let name = if self.name.trim().is_empty() {
            default_route_name(self.date)
        } else {
            self.name.clone()
        };

        Ok(CreateRouteData {
            name,
            date: self.date.format("%Y-%m-%d").to_string(),
            shift: self.shift,
            home_base: DEFAULT_HOME_BASE.to_string(),
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            employee_ids: self.selected_employees.clone(),
            home_base_location_id: self.home_base_location_id,
            destination_location_id: self.destination_location_id,
            start_time: Some(self.start_time.clone()),
            notes: None,
        })
    }

    /// Enviar al backend; la ruta devuelta ya viene optimizada
    pub async fn optimize(&mut self) -> ApiResult<&Route> {
        let data = self.route_data()?;

        match self.services.routes.create(&data).await {
            Ok(route) => Ok(&*self.optimized.insert(route)),
            Err(e) => {
                warn!("❌ Error al optimizar la ruta: {}", e);
                Err(e)
            }
        }
    }

    pub fn optimized_route(&self) -> Option<&Route> {
        self.optimized.as_ref()
    }

    /// Aceptar la ruta optimizada (ya persistida por el backend)
    pub fn confirm(&mut self) -> ApiResult<Route> {
        let route = self
            .optimized
            .take()
            .ok_or_else(|| validation_error("Primero debe optimizar la ruta"))?;
        info!("✅ Ruta '{}' creada exitosamente", route.name);
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{VehicleStatus, VehicleType};
    use crate::utils::errors::ApiError;

    fn van(capacity: u32) -> Vehicle {
        Vehicle {
            id: 4,
            license_plate: "XYZ789".into(),
            model: "Sprinter".into(),
            brand: "Mercedes".into(),
            year: Some(2022),
            capacity,
            vehicle_type: VehicleType::Van,
            status: VehicleStatus::Available,
            driver_name: None,
            driver_phone: None,
            provider: None,
            fuel_consumption: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn selection_needs_employees_and_vehicle() {
        let err = validate_selection(&[], Some(&van(10))).unwrap_err();
        assert_eq!(err.message(), "Datos inválidos: Por favor selecciona empleados y un vehículo");
        assert!(validate_selection(&[1, 2], None).is_err());
        assert!(validate_selection(&[1, 2], Some(&van(10))).is_ok());
    }

    #[test]
    fn selection_respects_capacity() {
        let err = validate_selection(&[1, 2, 3], Some(&van(2))).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(validate_selection(&[1, 2], Some(&van(2))).is_ok());
    }

    #[test]
    fn default_name_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(default_route_name(date), "Ruta 07/03/2024");
    }
}
