use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::reporte_controller::ReporteController;
use crate::dto::reporte_dto::{
    CierreCajaQuery, CierreCajaResponse, ComisionesQuery, ComisionesResponse, EstadisticasQuery,
    EstadisticasResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reporte_router() -> Router<AppState> {
    Router::new()
        .route("/cierre-caja", get(cierre_caja))
        .route("/comisiones", get(reporte_comisiones))
        .route("/estadisticas", get(estadisticas))
}

async fn cierre_caja(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<CierreCajaQuery>,
) -> Result<Json<CierreCajaResponse>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.cierre_caja(&user, &state.config, query).await?;
    Ok(Json(response))
}

async fn reporte_comisiones(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ComisionesQuery>,
) -> Result<Json<ComisionesResponse>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.comisiones(&user, &state.config, query).await?;
    Ok(Json(response))
}

async fn estadisticas(
    State(state): State<AppState>,
    Query(query): Query<EstadisticasQuery>,
) -> Result<Json<EstadisticasResponse>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    let response = controller.estadisticas(&state.config, query).await?;
    Ok(Json(response))
}
