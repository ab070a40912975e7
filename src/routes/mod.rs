//! Rutas de la API
//!
//! Cada módulo arma un `Router<AppState>` que se anida bajo `/api`.

pub mod auth_routes;
pub mod cliente_routes;
pub mod orden_routes;
pub mod punto_routes;
pub mod reporte_routes;
pub mod usuario_routes;
pub mod vehiculo_routes;

use axum::Router;

use crate::state::AppState;

/// Router con todos los recursos de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/usuarios", usuario_routes::create_usuario_router())
        .nest("/puntos", punto_routes::create_punto_router())
        .nest("/clientes", cliente_routes::create_cliente_router())
        .nest("/vehiculos", vehiculo_routes::create_vehiculo_router())
        .nest("/ordenes", orden_routes::create_orden_router())
        .nest("/reportes", reporte_routes::create_reporte_router())
}
