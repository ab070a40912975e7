use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::orden_controller::OrdenController;
use crate::dto::api_response::{ApiResponse, ListResponse};
use crate::dto::orden_dto::{
    CancelarOrdenRequest, CobrarOrdenRequest, CobroResponse, CrearOrdenRequest,
    OrdenCreadaResponse, OrdenFilters, OrdenResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_orden_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_orden).get(list_ordenes))
        .route("/:id", get(get_orden))
        .route("/:id/cobrar", post(cobrar_orden))
        .route("/:id/cancelar", post(cancelar_orden))
}

async fn crear_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CrearOrdenRequest>,
) -> Result<Json<ApiResponse<OrdenCreadaResponse>>, AppError> {
    let controller = OrdenController::new(state.pool.clone());
    let response = controller.crear(&user, &state.config, request).await?;
    Ok(Json(response))
}

async fn list_ordenes(
    State(state): State<AppState>,
    Query(filters): Query<OrdenFilters>,
) -> Result<Json<ListResponse<OrdenResponse>>, AppError> {
    let controller = OrdenController::new(state.pool.clone());
    let response = controller.list(&state.config, filters).await?;
    Ok(Json(response))
}

async fn get_orden(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrdenResponse>, AppError> {
    let controller = OrdenController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn cobrar_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CobrarOrdenRequest>,
) -> Result<Json<ApiResponse<CobroResponse>>, AppError> {
    let controller = OrdenController::new(state.pool.clone());
    let response = controller.cobrar(&user, id, request).await?;
    Ok(Json(response))
}

// El cuerpo es opcional: sin motivo se cancela igual
async fn cancelar_orden(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    request: Option<Json<CancelarOrdenRequest>>,
) -> Result<Json<ApiResponse<OrdenResponse>>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let controller = OrdenController::new(state.pool.clone());
    let response = controller.cancelar(&user, id, request).await?;
    Ok(Json(response))
}
