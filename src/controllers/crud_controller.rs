//! Flujo CRUD de una página de listado
//!
//! Lista cargada con un [`Resource`], búsqueda local más un filtro opcional por
//! predicado (estado, turno...), formulario de
//! creación/edición con [`FormState`] y borrado con confirmación previa. Tras
//! cada escritura exitosa la lista se vuelve a cargar.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::hooks::{FetchState, FormMode, FormState, Resource};
use crate::services::CrudService;
use crate::utils::errors::ApiResult;
use crate::utils::search::{filter_by_search, Searchable};

/// Predicado aplicado a la lista además de la búsqueda
pub type EntityFilter<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

pub struct CrudController<S: CrudService> {
    service: Arc<S>,
    list: Resource<Vec<S::Entity>>,
    search: String,
    filter: Option<EntityFilter<S::Entity>>,
    form: FormState<S::Draft>,
}

impl<S> CrudController<S>
where
    S: CrudService + 'static,
{
    pub fn new(service: S) -> Self {
        let service = Arc::new(service);
        let producer = service.clone();
        let list = Resource::new(move || {
            let service = producer.clone();
            async move { service.list().await }
        });

        Self {
            service,
            list,
            search: String::new(),
            filter: None,
            form: FormState::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn mount(&self) {
        self.list.mount().await;
    }

    pub async fn refetch(&self) {
        self.list.refetch().await;
    }

    pub fn list(&self) -> &Resource<Vec<S::Entity>> {
        &self.list
    }

    pub fn state(&self) -> FetchState<Vec<S::Entity>> {
        self.list.snapshot()
    }

    pub fn items(&self) -> Vec<S::Entity> {
        self.list.data().unwrap_or_default()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Reemplaza el filtro por predicado; se combina con la búsqueda
    pub fn set_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&S::Entity) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(predicate));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn form(&self) -> &FormState<S::Draft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<S::Draft> {
        &mut self.form
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, entity: &S::Entity) {
        self.form.load(S::entity_id(entity), S::draft_from(entity));
    }

    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// Enviar el formulario (crear o actualizar según el modo).
    ///
    /// Si falla, el formulario queda abierto con el borrador intacto.
    pub async fn submit(&mut self) -> ApiResult<S::Entity> {
        let draft = self.form.draft().clone();
        let result = match self.form.mode() {
            FormMode::Create => self.service.create_from(&draft).await,
            FormMode::Edit(id) => self.service.update_from(id, &draft).await,
        };

        match result {
            Ok(entity) => {
                info!(
                    "✅ {} guardado (id {})",
                    self.service.resource_name(),
                    S::entity_id(&entity)
                );
                self.form.commit();
                self.form.close();
                self.list.refetch().await;
                Ok(entity)
            }
            Err(e) => {
                warn!("❌ Error guardando {}: {}", self.service.resource_name(), e);
                Err(e)
            }
        }
    }

    /// Borrar tras confirmación. Devuelve `false` si el usuario canceló.
    pub async fn delete<C>(&self, id: i64, confirm: C) -> ApiResult<bool>
    where
        C: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }

        self.service.remove(id).await?;
        info!("🗑️ {} {} eliminado", self.service.resource_name(), id);
        self.list.refetch().await;
        Ok(true)
    }

    /// Ejecutar otra escritura (p. ej. un cambio de estado) y recargar si tuvo éxito
    pub async fn after_mutation<T, F>(&self, mutation: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let value = mutation.await?;
        self.list.refetch().await;
        Ok(value)
    }
}

impl<S> CrudController<S>
where
    S: CrudService + 'static,
    S::Entity: Searchable,
{
    /// Elementos que pasan el filtro y coinciden con el término de búsqueda
    pub fn filtered(&self) -> Vec<S::Entity> {
        let items: Vec<S::Entity> = match &self.filter {
            Some(predicate) => self.items().into_iter().filter(|item| predicate(item)).collect(),
            None => self.items(),
        };
        filter_by_search(&items, &self.search)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::{validation_error, ApiError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Depot {
        id: i64,
        name: String,
    }

    impl Searchable for Depot {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone()]
        }
    }

    #[derive(Default)]
    struct MemoryDepots {
        items: Mutex<Vec<Depot>>,
    }

    #[async_trait]
    impl CrudService for MemoryDepots {
        type Entity = Depot;
        type Draft = String;

        fn resource_name(&self) -> &'static str {
            "depósito"
        }

        fn entity_id(entity: &Depot) -> i64 {
            entity.id
        }

        fn draft_from(entity: &Depot) -> String {
            entity.name.clone()
        }

        async fn list(&self) -> ApiResult<Vec<Depot>> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn create_from(&self, draft: &String) -> ApiResult<Depot> {
            if draft.trim().is_empty() {
                return Err(validation_error("name (blank)"));
            }
            let mut items = self.items.lock().unwrap();
            let depot = Depot {
                id: items.len() as i64 + 1,
                name: draft.clone(),
            };
            items.push(depot.clone());
            Ok(depot)
        }

        async fn update_from(&self, id: i64, draft: &String) -> ApiResult<Depot> {
            let mut items = self.items.lock().unwrap();
            let depot = items
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    message: "No encontrado".into(),
                })?;
            depot.name = draft.clone();
            Ok(depot.clone())
        }

        async fn remove(&self, id: i64) -> ApiResult<()> {
            self.items.lock().unwrap().retain(|d| d.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_then_list_is_refetched() {
        let mut controller = CrudController::new(MemoryDepots::default());
        controller.mount().await;
        assert!(controller.items().is_empty());

        controller.open_create();
        *controller.form_mut().draft_mut() = "Sede Norte".to_string();
        let created = controller.submit().await.unwrap();

        assert_eq!(created.id, 1);
        assert!(!controller.form().is_open());
        assert_eq!(controller.items().len(), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_open() {
        let mut controller = CrudController::new(MemoryDepots::default());
        controller.open_create();
        *controller.form_mut().draft_mut() = "  ".to_string();

        let err = controller.submit().await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(controller.form().is_open());
        assert_eq!(controller.form().draft(), "  ");
    }

    #[tokio::test]
    async fn edit_updates_existing_record() {
        let mut controller = CrudController::new(MemoryDepots::default());
        controller.open_create();
        *controller.form_mut().draft_mut() = "Sede Sur".to_string();
        let depot = controller.submit().await.unwrap();

        controller.open_edit(&depot);
        assert_eq!(controller.form().editing_id(), Some(depot.id));
        controller.form_mut().update(|name| name.push_str(" 2"));
        let updated = controller.submit().await.unwrap();
        assert_eq!(updated.name, "Sede Sur 2");
        assert_eq!(controller.items()[0].name, "Sede Sur 2");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut controller = CrudController::new(MemoryDepots::default());
        controller.open_create();
        *controller.form_mut().draft_mut() = "Sede Centro".to_string();
        controller.submit().await.unwrap();

        assert!(!controller.delete(1, || false).await.unwrap());
        assert_eq!(controller.items().len(), 1);

        assert!(controller.delete(1, || true).await.unwrap());
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn search_filters_loaded_items() {
        let mut controller = CrudController::new(MemoryDepots::default());
        for name in ["Sede Norte", "Bodega Sur"] {
            controller.open_create();
            *controller.form_mut().draft_mut() = name.to_string();
            controller.submit().await.unwrap();
        }

        controller.set_search("norte");
        let found = controller.filtered();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Sede Norte");

        controller.set_search("");
        assert_eq!(controller.filtered().len(), 2);
    }

    #[tokio::test]
    async fn predicate_filter_combines_with_search() {
        let mut controller = CrudController::new(MemoryDepots::default());
        for name in ["Sede Norte", "Sede Sur", "Bodega Norte"] {
            controller.open_create();
            *controller.form_mut().draft_mut() = name.to_string();
            controller.submit().await.unwrap();
        }

        controller.set_filter(|depot: &Depot| depot.name.starts_with("Sede"));
        assert_eq!(controller.filtered().len(), 2);

        controller.set_search("norte");
        let found = controller.filtered();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        controller.clear_filter();
        assert_eq!(controller.filtered().len(), 2);
    }
}
