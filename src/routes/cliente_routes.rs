use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::cliente_controller::ClienteController;
use crate::dto::api_response::{ApiResponse, ListResponse};
use crate::dto::cliente_dto::{
    ClienteDetalleResponse, ClienteFilters, ClienteResponse, RegistrarClienteRequest,
    UpdateClienteRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cliente_router() -> Router<AppState> {
    Router::new()
        .route("/", post(registrar_cliente).get(list_clientes))
        .route("/placa/:placa", get(get_cliente_por_placa))
        .route("/:id", get(get_cliente).put(update_cliente))
}

async fn registrar_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<RegistrarClienteRequest>,
) -> Result<Json<ApiResponse<ClienteDetalleResponse>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.registrar(&user, &state.config, request).await?;
    Ok(Json(response))
}

async fn list_clientes(
    State(state): State<AppState>,
    Query(filters): Query<ClienteFilters>,
) -> Result<Json<ListResponse<ClienteResponse>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_cliente_por_placa(
    State(state): State<AppState>,
    Path(placa): Path<String>,
) -> Result<Json<ClienteDetalleResponse>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.buscar_por_placa(&state.config, &placa).await?;
    Ok(Json(response))
}

async fn get_cliente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClienteDetalleResponse>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.get_by_id(&state.config, id).await?;
    Ok(Json(response))
}

async fn update_cliente(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClienteRequest>,
) -> Result<Json<ApiResponse<ClienteResponse>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}
