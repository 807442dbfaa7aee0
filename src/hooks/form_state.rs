//! Estado de formulario de creación/edición
//!
//! Mantiene el borrador separado del registro cargado: editar el borrador nunca
//! toca la copia original, y [`FormState::reset`] vuelve a ella.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone)]
pub struct FormState<T> {
    original: T,
    draft: T,
    mode: FormMode,
    open: bool,
}

impl<T: Clone + Default + PartialEq> Default for FormState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default + PartialEq> FormState<T> {
    pub fn new() -> Self {
        Self {
            original: T::default(),
            draft: T::default(),
            mode: FormMode::Create,
            open: false,
        }
    }

    /// Abrir en modo creación con un borrador vacío
    pub fn open_create(&mut self) {
        self.original = T::default();
        self.draft = T::default();
        self.mode = FormMode::Create;
        self.open = true;
    }

    /// Abrir en modo edición a partir del registro `id`
    pub fn load(&mut self, id: i64, entity: T) {
        self.draft = entity.clone();
        self.original = entity;
        self.mode = FormMode::Edit(id);
        self.open = true;
    }

    /// Descartar los cambios del borrador
    pub fn reset(&mut self) {
        self.draft = self.original.clone();
    }

    /// Tomar el borrador como nueva base y devolverlo
    pub fn commit(&mut self) -> T {
        self.original = self.draft.clone();
        self.draft.clone()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.original = T::default();
        self.draft = T::default();
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn update(&mut self, edit: impl FnOnce(&mut T)) {
        edit(&mut self.draft);
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Draft {
        name: String,
        capacity: u32,
    }

    #[test]
    fn edits_do_not_touch_loaded_record() {
        let mut form = FormState::new();
        form.load(
            3,
            Draft {
                name: "Van 1".into(),
                capacity: 12,
            },
        );
        assert_eq!(form.editing_id(), Some(3));
        assert!(!form.is_dirty());

        form.update(|d| d.capacity = 15);
        assert!(form.is_dirty());

        form.reset();
        assert_eq!(form.draft().capacity, 12);
    }

    #[test]
    fn commit_moves_the_baseline() {
        let mut form: FormState<Draft> = FormState::default();
        form.open_create();
        assert_eq!(form.mode(), FormMode::Create);
        form.draft_mut().name = "Bus 2".into();

        let sent = form.commit();
        assert_eq!(sent.name, "Bus 2");
        assert!(!form.is_dirty());

        form.close();
        assert!(!form.is_open());
        assert_eq!(form.draft(), &Draft::default());
    }
}
