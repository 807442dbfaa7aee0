//! Mutación asíncrona con indicador de carga y último error

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;

use crate::utils::errors::ApiResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<String>,
}

pub struct Mutation<P, T> {
    call: Arc<dyn Fn(P) -> BoxFuture<'static, ApiResult<T>> + Send + Sync>,
    state: watch::Sender<MutationState>,
}

impl<P, T> Mutation<P, T>
where
    P: Send + 'static,
    T: Send + 'static,
{
    pub fn new<F, Fut>(call: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(MutationState::default());
        Self {
            call: Arc::new(move |params| call(params).boxed()),
            state,
        }
    }

    /// Ejecutar la mutación. El error queda registrado y además se devuelve.
    pub async fn mutate(&self, params: P) -> ApiResult<T> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = (self.call)(params).await;

        self.state.send_modify(|state| {
            state.loading = false;
            if let Err(e) = &result {
                state.error = Some(e.message());
            }
        });
        result
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn reset(&self) {
        self.state.send_replace(MutationState::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ApiError;

    #[tokio::test]
    async fn successful_mutation_returns_value() {
        let double = Mutation::new(|n: u32| async move { Ok(n * 2) });
        assert_eq!(double.mutate(21).await.unwrap(), 42);
        assert!(!double.loading());
        assert!(double.error().is_none());
    }

    #[tokio::test]
    async fn failed_mutation_records_and_returns_error() {
        let fail: Mutation<(), ()> = Mutation::new(|_| async {
            Err(ApiError::Status {
                status: 409,
                message: "Placa duplicada".into(),
            })
        });

        let err = fail.mutate(()).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(fail.error().as_deref(), Some("Placa duplicada"));
        assert!(!fail.loading());

        fail.reset();
        assert!(fail.error().is_none());
    }
}
