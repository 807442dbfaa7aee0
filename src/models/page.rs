use serde::{Deserialize, Serialize};

/// Envoltorio paginado de los endpoints de listado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Respuesta genérica `{ "message": ... }` de las operaciones de borrado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}
