//! Construcción de query strings a partir de objetos de filtros
//!
//! Los filtros se serializan con serde; solo los campos definidos y distintos de
//! cadena vacía llegan a la URL.

use serde::Serialize;
use serde_json::Value;

use crate::utils::errors::ApiResult;

/// Convierte un filtro en pares `(clave, valor)` listos para la URL
pub fn filter_pairs<F: Serialize>(filters: &F) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(filters)?;
    let mut pairs = Vec::new();

    if let Value::Object(map) = value {
        for (key, value) in map {
            let rendered = match value {
                Value::Null => continue,
                Value::String(s) if s.is_empty() => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                // Arrays y objetos anidados no se usan en filtros
                other => other.to_string(),
            };
            pairs.push((key, rendered));
        }
    }

    Ok(pairs)
}

/// Codifica pares como `a=1&b=dos`
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Añade el query string de `filters` a `path` (sin `?` si no hay parámetros)
pub fn with_query<F: Serialize>(path: &str, filters: &F) -> ApiResult<String> {
    let query = encode_pairs(&filter_pairs(filters)?);
    if query.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        status: Option<String>,
        department: Option<String>,
        search: Option<String>,
        is_active: Option<bool>,
        page: Option<u32>,
    }

    #[test]
    fn skips_missing_and_empty_fields() {
        let filters = Filters {
            status: Some("active".into()),
            department: Some(String::new()),
            search: None,
            is_active: Some(false),
            page: Some(2),
        };

        let pairs = filter_pairs(&filters).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();

        assert!(keys.contains(&"status"));
        assert!(keys.contains(&"isActive"));
        assert!(keys.contains(&"page"));
        assert!(!keys.contains(&"department"));
        assert!(!keys.contains(&"search"));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn empty_filters_produce_bare_path() {
        assert_eq!(with_query("/employees", &Filters::default()).unwrap(), "/employees");
    }

    #[test]
    fn values_are_url_encoded() {
        let filters = Filters {
            search: Some("Pérez & hijos".into()),
            ..Default::default()
        };
        let url = with_query("/employees", &filters).unwrap();
        assert_eq!(url, "/employees?search=P%C3%A9rez%20%26%20hijos");
    }
}
