//! Estado reactivo de las vistas
//!
//! - [`Resource`]: carga asíncrona con `{data, loading, error}`
//! - [`Mutation`]: operación de escritura con indicador de carga
//! - [`FormState`]: borrador de formulario aislado del registro cargado

pub mod form_state;
pub mod mutation;
pub mod resource;

pub use form_state::{FormMode, FormState};
pub use mutation::{Mutation, MutationState};
pub use resource::{FetchPhase, FetchState, OverlapPolicy, Resource, ResourceOptions};
