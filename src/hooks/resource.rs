//! Recurso asíncrono con estado `{data, loading, error}`
//!
//! Envuelve un productor asíncrono y publica su estado en un canal `watch` para
//! que cualquier vista pueda reaccionar a los cambios. Se vuelve a ejecutar al
//! montar, al cambiar el valor de dependencias y bajo demanda con
//! [`Resource::refetch`].
//!
//! Cada invocación recibe un número de secuencia. Con
//! [`OverlapPolicy::LatestIssued`] (por defecto) solo se aplica el resultado de
//! la última invocación emitida y las respuestas obsoletas se descartan; con
//! [`OverlapPolicy::LastSettled`] gana la última en completarse.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::utils::errors::ApiResult;

type Producer<T, D> = Arc<dyn Fn(&D) -> BoxFuture<'static, ApiResult<T>> + Send + Sync>;

/// Qué hacer cuando varias invocaciones se solapan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Solo la invocación emitida más recientemente puede escribir el estado
    #[default]
    LatestIssued,
    /// Cada invocación escribe al completarse, en el orden en que terminan
    LastSettled,
}

/// Fase derivada del estado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Error
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }
}

/// Opciones de construcción de un [`Resource`]
#[derive(Debug, Clone)]
pub struct ResourceOptions<T, D> {
    pub initial_data: Option<T>,
    pub dependencies: D,
    pub enabled: bool,
    pub policy: OverlapPolicy,
}

impl<T, D: Default> Default for ResourceOptions<T, D> {
    fn default() -> Self {
        Self {
            initial_data: None,
            dependencies: D::default(),
            enabled: true,
            policy: OverlapPolicy::default(),
        }
    }
}

impl<T, D> ResourceOptions<T, D> {
    pub fn with_dependencies(dependencies: D) -> Self {
        Self {
            initial_data: None,
            dependencies,
            enabled: true,
            policy: OverlapPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn initial_data(mut self, data: T) -> Self {
        self.initial_data = Some(data);
        self
    }
}

pub struct Resource<T, D = ()> {
    producer: Producer<T, D>,
    dependencies: Mutex<D>,
    enabled: AtomicBool,
    policy: OverlapPolicy,
    issued: AtomicU64,
    state: watch::Sender<FetchState<T>>,
}

impl<T> Resource<T, ()>
where
    T: Clone + Send + Sync + 'static,
{
    /// Recurso sin dependencias con opciones por defecto
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Self::with_options(move |_: &()| producer(), ResourceOptions::default())
    }
}

impl<T, D> Resource<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + Send + 'static,
{
    /// Recurso cuyo productor recibe el valor actual de las dependencias
    pub fn with_options<F, Fut>(producer: F, options: ResourceOptions<T, D>) -> Self
    where
        F: Fn(&D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let producer: Producer<T, D> = Arc::new(move |deps: &D| producer(deps).boxed());
        let (state, _) = watch::channel(FetchState {
            data: options.initial_data,
            loading: options.enabled,
            error: None,
        });

        Self {
            producer,
            dependencies: Mutex::new(options.dependencies),
            enabled: AtomicBool::new(options.enabled),
            policy: options.policy,
            issued: AtomicU64::new(0),
            state,
        }
    }

    /// Primera carga (equivalente al montaje de la vista)
    pub async fn mount(&self) {
        self.refetch().await;
    }

    /// Volver a invocar el productor con las dependencias actuales
    pub async fn refetch(&self) {
        if !self.is_enabled() {
            return;
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let dependencies = self
            .dependencies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let result = (self.producer)(&dependencies).await;

        if self.policy == OverlapPolicy::LatestIssued {
            let latest = self.issued.load(Ordering::SeqCst);
            if seq != latest {
                debug!("⏭️ Respuesta obsoleta descartada (#{} < #{})", seq, latest);
                return;
            }
        }

        self.state.send_modify(|state| {
            match result {
                Ok(data) => state.data = Some(data),
                Err(e) => {
                    warn!("⚠️ Error cargando recurso: {}", e);
                    state.error = Some(e.message());
                }
            }
            state.loading = false;
        });
    }

    /// Reemplazar las dependencias; si cambiaron, se vuelve a cargar.
    ///
    /// Devuelve `true` si hubo recarga.
    pub async fn set_dependencies(&self, dependencies: D) -> bool {
        let changed = {
            let mut current = self.dependencies.lock().unwrap_or_else(|e| e.into_inner());
            if *current == dependencies {
                false
            } else {
                *current = dependencies;
                true
            }
        };

        if changed {
            self.refetch().await;
        }
        changed && self.is_enabled()
    }

    /// Activar o desactivar; al activarse se carga inmediatamente
    pub async fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::SeqCst);
        if enabled && !was {
            self.refetch().await;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn dependencies(&self) -> D {
        self.dependencies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Descartar el error mostrado sin recargar
    pub fn dismiss_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Receptor que se notifica en cada cambio de estado
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }
}
