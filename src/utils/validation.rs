//! Utilidades de validación
//!
//! Validadores personalizados para los formularios de creación, usados vía
//! `#[validate(custom = "...")]`.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

/// Validar fecha `YYYY-MM-DD`
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar hora `HH:MM` (se aceptan también segundos)
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|_| ())
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar par latitud/longitud en grados decimales
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);
    if !valid {
        let mut error = ValidationError::new("coordinates");
        error.add_param("latitude".into(), &latitude);
        error.add_param("longitude".into(), &longitude);
        return Err(error);
    }
    Ok(())
}
