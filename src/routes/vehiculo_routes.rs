use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehiculo_controller::{VehiculoController, VehiculoDetalleResponse};
use crate::dto::orden_dto::OrdenResponse;
use crate::dto::vehiculo_dto::VehiculoQuery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehiculo_router() -> Router<AppState> {
    Router::new()
        .route("/placa/:placa", get(get_vehiculo_por_placa))
        .route("/:id", get(get_vehiculo))
        .route("/:id/ordenes", get(list_ordenes_vehiculo))
}

async fn get_vehiculo_por_placa(
    State(state): State<AppState>,
    Path(placa): Path<String>,
    Query(query): Query<VehiculoQuery>,
) -> Result<Json<VehiculoDetalleResponse>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller
        .buscar_por_placa(&state.config, &placa, &query)
        .await?;
    Ok(Json(response))
}

async fn get_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VehiculoQuery>,
) -> Result<Json<VehiculoDetalleResponse>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.get_by_id(&state.config, id, &query).await?;
    Ok(Json(response))
}

async fn list_ordenes_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VehiculoQuery>,
) -> Result<Json<Vec<OrdenResponse>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.ordenes_recientes(id, &query).await?;
    Ok(Json(response))
}
