use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::api_response::ApiResponse;
use crate::dto::punto_dto::{CreatePuntoRequest, PuntoResponse, UpdatePuntoRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::punto::Punto;
use crate::repositories::punto_repository::PuntoRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct PuntoController {
    repository: PuntoRepository,
}

impl PuntoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PuntoRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        config: &EnvironmentConfig,
        request: CreatePuntoRequest,
    ) -> Result<ApiResponse<PuntoResponse>, AppError> {
        actor.require("puntos")?;
        request.validate()?;

        let punto = Punto::new(
            request.nombre.trim().to_string(),
            request.direccion.trim().to_string(),
            request.tarifas.unwrap_or_default(),
            request
                .umbral_fidelizacion
                .unwrap_or(config.default_loyalty_threshold),
            request
                .porcentaje_comision
                .unwrap_or(config.default_commission_percentage),
        );
        let saved = self.repository.create(&punto).await?;

        info!("🏪 Punto creado: {}", saved.nombre);
        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Punto creado exitosamente",
        ))
    }

    pub async fn list(&self) -> Result<Vec<PuntoResponse>, AppError> {
        let puntos = self.repository.list().await?;
        Ok(puntos.into_iter().map(PuntoResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PuntoResponse, AppError> {
        let punto = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Punto", &id.to_string()))?;
        Ok(punto.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdatePuntoRequest,
    ) -> Result<ApiResponse<PuntoResponse>, AppError> {
        actor.require("puntos")?;
        request.validate()?;

        let mut punto = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Punto", &id.to_string()))?;

        if let Some(nombre) = request.nombre {
            punto.nombre = nombre.trim().to_string();
        }
        if let Some(direccion) = request.direccion {
            punto.direccion = direccion.trim().to_string();
        }
        if let Some(tarifas) = request.tarifas {
            punto.tarifas = Json(tarifas);
        }
        if let Some(umbral) = request.umbral_fidelizacion {
            punto.umbral_fidelizacion = umbral;
        }
        if let Some(porcentaje) = request.porcentaje_comision {
            punto.porcentaje_comision = porcentaje;
        }
        if let Some(activo) = request.activo {
            punto.activo = activo;
        }

        let updated = self.repository.update(&punto).await?;
        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Punto actualizado exitosamente",
        ))
    }
}
