use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::api_response::ApiResponse;
use crate::dto::usuario_dto::{
    CreateUsuarioRequest, LiquidacionComisionResponse, UpdateUsuarioRequest, UsuarioFilters,
    UsuarioResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_usuario_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_usuario).get(list_usuarios))
        .route("/lavadores", get(list_lavadores))
        .route(
            "/:id",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
        .route("/:id/liquidar-comision", post(liquidar_comision))
}

async fn create_usuario(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_usuarios(
    State(state): State<AppState>,
    Query(filters): Query<UsuarioFilters>,
) -> Result<Json<Vec<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn list_lavadores(
    State(state): State<AppState>,
) -> Result<Json<Vec<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.lavadores().await?;
    Ok(Json(response))
}

async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_usuario(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_usuario(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}

async fn liquidar_comision(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LiquidacionComisionResponse>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let response = controller.liquidar_comision(&user, id).await?;
    Ok(Json(response))
}
