//! Backend del punto de venta y fidelización de lavaderos
//!
//! Capas: rutas → controladores → servicios y repositorios → PostgreSQL.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::warn;

use crate::middleware::{auth_middleware, cors_for};
use crate::state::AppState;

/// Armar el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::create_api_router())
        .layer(from_fn(auth_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check con ping a la base de datos
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, database) = match database::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(e) => {
            warn!("⚠️ Health check sin base de datos: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "disconnected")
        }
    };

    let estado = if status == StatusCode::OK { "ok" } else { "degraded" };
    (
        status,
        Json(json!({
            "status": estado,
            "database": database,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
