//! Estado de sesión compartido
//!
//! [`Session`] encapsula el token bearer y el almacenamiento persistente. Se
//! comparte por referencia (`Arc`) entre el cliente HTTP y los servicios; los
//! únicos mutadores del token son [`Session::set_token`] y [`Session::clear_token`].

pub mod storage;

use std::sync::{Arc, RwLock};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::utils::errors::ApiResult;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Clave del token en el almacenamiento persistente
pub const TOKEN_KEY: &str = "auth_token";
/// Clave del usuario (JSON) en el almacenamiento persistente
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Crear la sesión cargando una única vez el token persistido
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("⚠️ No se pudo leer el token persistido: {}", e);
                None
            }
        };

        if token.is_some() {
            info!("🔑 Sesión restaurada desde almacenamiento");
        }

        Self {
            token: Arc::new(RwLock::new(token)),
            storage,
        }
    }

    /// Sesión volátil en memoria
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// Persistir token y usuario, y actualizar el token en memoria.
    ///
    /// El token en memoria solo cambia si ambas escrituras tuvieron éxito; si
    /// falla la del usuario se retira el token ya escrito.
    pub fn set_token<U: Serialize>(&self, token: &str, user: &U) -> ApiResult<()> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json) {
            warn!("⚠️ No se pudo guardar el usuario, descartando token: {}", e);
            if let Err(rollback) = self.storage.remove(TOKEN_KEY) {
                warn!("⚠️ No se pudo retirar el token persistido: {}", rollback);
            }
            return Err(e);
        }

        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        debug!("💾 Token de sesión almacenado");
        Ok(())
    }

    /// Borrar token en memoria y entradas persistidas
    pub fn clear_token(&self) -> ApiResult<()> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        debug!("🧹 Sesión eliminada");
        Ok(())
    }

    /// Usuario persistido, si existe y es JSON válido
    pub fn stored_user<U: DeserializeOwned>(&self) -> ApiResult<Option<U>> {
        match self.storage.get(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// `true` si hay un token en el almacenamiento persistente
    pub fn has_stored_token(&self) -> ApiResult<bool> {
        Ok(self.storage.get(TOKEN_KEY)?.is_some_and(|t| !t.is_empty()))
    }
}
