//! Modelo de Vehicle
//!
//! Vehículo de la flota: placa, capacidad, tipo y estado operativo.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::search::Searchable;
use crate::utils::validation::validate_not_blank;

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Bus,
    Van,
    Minibus,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bus => "Bus",
            VehicleType::Van => "Van",
            VehicleType::Minibus => "Minibus",
        }
    }
}

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InRoute,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InRoute => "in_route",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::OutOfService => "out_of_service",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Disponible",
            VehicleStatus::InRoute => "En Ruta",
            VehicleStatus::Maintenance => "Mantenimiento",
            VehicleStatus::OutOfService => "Fuera de Servicio",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub license_plate: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub driver_phone: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub fuel_consumption: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Vehicle {
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// `"Chevrolet NPR (ABC123)"`
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
            .trim()
            .to_string()
    }
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.license_plate.clone(),
            self.model.clone(),
            self.brand.clone(),
        ];
        if let Some(driver) = &self.driver_name {
            fields.push(driver.clone());
        }
        fields
    }
}

/// Datos de creación de un vehículo
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleData {
    #[validate(length(min = 3, max = 20), custom = "validate_not_blank")]
    pub license_plate: String,
    pub model: String,
    pub brand: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1))]
    pub capacity: u32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Vehicle> for CreateVehicleData {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            license_plate: vehicle.license_plate.clone(),
            model: vehicle.model.clone(),
            brand: vehicle.brand.clone(),
            year: vehicle.year.unwrap_or_default(),
            capacity: vehicle.capacity,
            vehicle_type: vehicle.vehicle_type,
            status: Some(vehicle.status),
            driver_name: vehicle.driver_name.clone(),
            driver_phone: vehicle.driver_phone.clone(),
            provider: vehicle.provider.clone(),
            fuel_consumption: vehicle.fuel_consumption,
            is_active: Some(vehicle.is_active),
        }
    }
}

/// Actualización parcial de un vehículo
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<CreateVehicleData> for UpdateVehicleData {
    fn from(data: CreateVehicleData) -> Self {
        Self {
            license_plate: Some(data.license_plate),
            model: Some(data.model),
            brand: Some(data.brand),
            year: Some(data.year),
            capacity: Some(data.capacity),
            vehicle_type: Some(data.vehicle_type),
            status: data.status,
            driver_name: data.driver_name,
            driver_phone: data.driver_phone,
            provider: data.provider,
            fuel_consumption: data.fuel_consumption,
            is_active: data.is_active,
        }
    }
}

/// Filtros para el listado de vehículos
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub provider: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleStatusUpdate {
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeStat {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub count: u64,
    #[serde(default)]
    pub total_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderStat {
    pub provider: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStats {
    pub total: u64,
    pub available: u64,
    pub in_route: u64,
    pub maintenance: u64,
    #[serde(default)]
    pub type_stats: Vec<VehicleTypeStat>,
    #[serde(default)]
    pub provider_stats: Vec<ProviderStat>,
}
