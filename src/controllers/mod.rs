//! Controladores de página
//!
//! Orquestan servicios y estado reactivo para las pantallas del cliente.

pub mod crud_controller;
pub mod plan_route_controller;

pub use crud_controller::CrudController;
pub use plan_route_controller::PlanRouteController;
