//! Modelo de Employee
//!
//! Empleado transportado: datos de contacto, dirección geocodificada y estado.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::formatters;
use crate::utils::search::Searchable;
use crate::utils::validation::{validate_coordinates, validate_not_blank};

/// Estado del empleado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on_leave",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Activo",
            EmployeeStatus::Inactive => "Inactivo",
            EmployeeStatus::OnLeave => "En Licencia",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub preferred_shift: Option<String>,
    #[serde(default)]
    pub home_base: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Employee {
    /// Nombre para mostrar; usa `fullName` del servidor si viene informado
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => formatters::full_name(Some(&self.first_name), Some(&self.last_name)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.display_name(),
            self.email.clone(),
            self.department.clone(),
        ]
    }
}

/// Datos de creación de un empleado
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_employee_coordinates"))]
pub struct CreateEmployeeData {
    #[validate(custom = "validate_not_blank")]
    pub first_name: String,
    #[validate(custom = "validate_not_blank")]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(custom = "validate_not_blank")]
    pub address: String,
    pub department: String,
    pub position: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

fn validate_employee_coordinates(data: &CreateEmployeeData) -> Result<(), ValidationError> {
    validate_coordinates(data.latitude, data.longitude)
}

impl From<&Employee> for CreateEmployeeData {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            address: employee.address.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            latitude: employee.latitude,
            longitude: employee.longitude,
            preferred_shift: employee.preferred_shift.clone(),
            home_base: employee.home_base.clone(),
            status: Some(employee.status),
        }
    }
}

/// Actualización parcial: solo los campos presentes se envían
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_shift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl From<CreateEmployeeData> for UpdateEmployeeData {
    fn from(data: CreateEmployeeData) -> Self {
        Self {
            first_name: Some(data.first_name),
            last_name: Some(data.last_name),
            email: Some(data.email),
            phone: Some(data.phone),
            address: Some(data.address),
            department: Some(data.department),
            position: Some(data.position),
            latitude: Some(data.latitude),
            longitude: Some(data.longitude),
            preferred_shift: data.preferred_shift,
            home_base: data.home_base,
            status: data.status,
        }
    }
}

/// Filtros para el listado de empleados
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilters {
    pub status: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub on_leave: u64,
    #[serde(default)]
    pub department_stats: Vec<DepartmentCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::search::filter_by_search;
    use serde_json::json;

    fn employee(id: i64, first: &str, last: &str, department: &str) -> Employee {
        serde_json::from_value(json!({
            "id": id,
            "firstName": first,
            "lastName": last,
            "email": format!("{}@optiroute.co", first.to_lowercase()),
            "department": department,
            "status": "active"
        }))
        .unwrap()
    }

    #[test]
    fn search_by_department_is_case_insensitive() {
        let employees = vec![
            employee(1, "Juan", "Pérez", "Ventas"),
            employee(2, "Ana", "Gómez", "IT"),
        ];
        let found = filter_by_search(&employees, "ventas");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Juan");
    }

    #[test]
    fn search_matches_full_name_and_email() {
        let employees = vec![
            employee(1, "Juan", "Pérez", "Ventas"),
            employee(2, "Ana", "Gómez", "IT"),
        ];
        assert_eq!(filter_by_search(&employees, "ANA GÓ")[0].id, 2);
        assert_eq!(filter_by_search(&employees, "juan@")[0].id, 1);
        assert!(filter_by_search(&employees, "logística").is_empty());
    }

    fn valid_create_data() -> CreateEmployeeData {
        CreateEmployeeData {
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            email: "juan@optiroute.co".into(),
            address: "Calle 10 # 20-30".into(),
            latitude: 4.65,
            longitude: -74.05,
            ..Default::default()
        }
    }

    #[test]
    fn create_data_rejects_bad_email() {
        let data = CreateEmployeeData {
            email: "juan".into(),
            ..valid_create_data()
        };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(valid_create_data().validate().is_ok());
    }

    #[test]
    fn create_data_rejects_out_of_range_coordinates() {
        let data = CreateEmployeeData {
            latitude: 120.0,
            ..valid_create_data()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn partial_update_omits_missing_fields() {
        let update = UpdateEmployeeData {
            department: Some("Logística".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"department": "Logística"})
        );
    }
}
