//! Modelo de Location
//!
//! Ubicaciones fijas: bases de salida, oficinas de destino y puntos intermedios.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::search::Searchable;
use crate::utils::validation::{validate_coordinates, validate_not_blank};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[default]
    HomeBase,
    Office,
    Waypoint,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::HomeBase => "home_base",
            LocationType::Office => "office",
            LocationType::Waypoint => "waypoint",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationType::HomeBase => "Base de Salida",
            LocationType::Office => "Oficina",
            LocationType::Waypoint => "Punto Intermedio",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Searchable for Location {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.address.clone()]
    }
}

/// Ubicaciones predeterminadas por tipo
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefaultLocations {
    pub home_base: Option<Location>,
    pub office: Option<Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_location_coordinates"))]
pub struct CreateLocationData {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_not_blank")]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

fn validate_location_coordinates(data: &CreateLocationData) -> Result<(), ValidationError> {
    validate_coordinates(data.latitude, data.longitude)
}

impl From<&Location> for CreateLocationData {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            address: location.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            location_type: location.location_type,
            description: location.description.clone(),
            is_active: Some(location.is_active),
            is_default: Some(location.is_default),
        }
    }
}

/// Actualización parcial (PATCH) de una ubicación
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl From<CreateLocationData> for UpdateLocationData {
    fn from(data: CreateLocationData) -> Self {
        Self {
            name: Some(data.name),
            address: Some(data.address),
            latitude: Some(data.latitude),
            longitude: Some(data.longitude),
            location_type: Some(data.location_type),
            description: data.description,
            is_active: data.is_active,
            is_default: data.is_default,
        }
    }
}

/// Agrupa ubicaciones por tipo, en el orden recibido
pub fn group_by_type(locations: &[Location], location_type: LocationType) -> Vec<&Location> {
    locations
        .iter()
        .filter(|l| l.location_type == location_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(id: i64, kind: &str, is_default: bool) -> Location {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Sede {}", id),
            "address": "Av. Siempre Viva 742",
            "latitude": 4.6,
            "longitude": -74.1,
            "type": kind,
            "isDefault": is_default
        }))
        .unwrap()
    }

    #[test]
    fn groups_locations_by_type() {
        let locations = vec![
            location(1, "home_base", true),
            location(2, "office", false),
            location(3, "home_base", false),
        ];
        let bases = group_by_type(&locations, LocationType::HomeBase);
        assert_eq!(bases.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(bases[0].is_default);
        assert!(group_by_type(&locations, LocationType::Waypoint).is_empty());
    }

    #[test]
    fn decodes_defaults_with_missing_office() {
        let defaults: DefaultLocations = serde_json::from_value(json!({
            "homeBase": {
                "id": 1, "name": "Base", "address": "Calle 1", "latitude": 4.6,
                "longitude": -74.1, "type": "home_base", "isDefault": true
            },
            "office": null
        }))
        .unwrap();
        assert_eq!(defaults.home_base.unwrap().id, 1);
        assert!(defaults.office.is_none());
    }
}
