//! Formateadores de presentación
//!
//! Etiquetas en español y formatos cortos usados por las vistas (distancias,
//! duraciones, tiempos relativos, moneda).

use chrono::{DateTime, Utc};

/// `12.345` -> `"12.3 km"`
pub fn distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Minutos a `"1h 5m"` o `"45m"`
pub fn duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

pub fn percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `"07:30:00"` -> `"07:30"`
pub fn time(value: &str) -> String {
    value.chars().take(5).collect()
}

/// Tiempo relativo compacto respecto a `now`: `Ahora`, `5m`, `3h`, `2d`
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - date).num_minutes();
    if minutes < 1 {
        return "Ahora".to_string();
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    format!("{}d", hours / 24)
}

/// Pesos colombianos sin decimales: `1234567.4` -> `"$ 1.234.567"`
pub fn currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}$ {}", sign, grouped)
}

/// Nombre completo, o `"N/A"` si ambos están vacíos
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    let name = format!("{} {}", first_name.unwrap_or(""), last_name.unwrap_or(""));
    let name = name.trim();
    if name.is_empty() {
        "N/A".to_string()
    } else {
        name.to_string()
    }
}

/// Etiqueta de tipo de actividad del dashboard; valores desconocidos pasan tal cual
pub fn activity_type(kind: &str) -> String {
    match kind {
        "route" => "Ruta",
        "employee" => "Empleado",
        "vehicle" => "Vehículo",
        "maintenance" => "Mantenimiento",
        "completed" => "Completado",
        "planned" => "Planificado",
        "in_progress" => "En Progreso",
        "cancelled" => "Cancelado",
        other => other,
    }
    .to_string()
}
