//! Modelos de autenticación
//!
//! Usuario de sesión, credenciales y registro.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Rol del usuario en la aplicación
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Driver,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Driver => "driver",
            UserRole::Employee => "employee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Driver => "Conductor",
            UserRole::Employee => "Empleado",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Empleado vinculado (usuarios con rol `employee`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    /// Vehículo asignado (usuarios con rol `driver`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
}

impl User {
    pub fn full_name(&self) -> String {
        crate::utils::formatters::full_name(Some(&self.first_name), Some(&self.last_name))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Datos de registro de un nuevo usuario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub role: UserRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_login_response_from_backend() {
        let raw = json!({
            "success": true,
            "token": "abc",
            "user": {
                "id": 7,
                "email": "driver@optiroute.co",
                "firstName": "Carlos",
                "lastName": "Ruiz",
                "role": "driver",
                "status": "active",
                "vehicleId": 3
            }
        });
        let response: LoginResponse = serde_json::from_value(raw).unwrap();
        let user = response.user.unwrap();
        assert_eq!(user.role, UserRole::Driver);
        assert_eq!(user.vehicle_id, Some(3));
        assert_eq!(user.full_name(), "Carlos Ruiz");
    }

    #[test]
    fn register_data_is_validated() {
        let data = RegisterData {
            email: "no-es-email".into(),
            password: "123".into(),
            first_name: "Ana".into(),
            last_name: "Gómez".into(),
            role: UserRole::Employee,
            phone: None,
            employee_id: Some(2),
            vehicle_id: None,
        };
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
