use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::punto_controller::PuntoController;
use crate::dto::api_response::ApiResponse;
use crate::dto::punto_dto::{CreatePuntoRequest, PuntoResponse, UpdatePuntoRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_punto_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_punto).get(list_puntos))
        .route("/:id", get(get_punto).put(update_punto))
}

async fn create_punto(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePuntoRequest>,
) -> Result<Json<ApiResponse<PuntoResponse>>, AppError> {
    let controller = PuntoController::new(state.pool.clone());
    let response = controller.create(&user, &state.config, request).await?;
    Ok(Json(response))
}

async fn list_puntos(State(state): State<AppState>) -> Result<Json<Vec<PuntoResponse>>, AppError> {
    let controller = PuntoController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_punto(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PuntoResponse>, AppError> {
    let controller = PuntoController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_punto(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePuntoRequest>,
) -> Result<Json<ApiResponse<PuntoResponse>>, AppError> {
    let controller = PuntoController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}
