use sqlx::PgPool;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::orden_dto::OrdenResponse;
use crate::dto::vehiculo_dto::{FidelizacionInfo, VehiculoQuery, VehiculoResponse};
use crate::models::vehiculo::Vehiculo;
use crate::repositories::orden_repository::OrdenRepository;
use crate::repositories::punto_repository::PuntoRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::normalizar_placa;

// Vehículo con el estado de fidelización
#[derive(Debug, serde::Serialize)]
pub struct VehiculoDetalleResponse {
    pub vehiculo: VehiculoResponse,
    pub fidelizacion: FidelizacionInfo,
}

pub struct VehiculoController {
    repository: VehiculoRepository,
    ordenes: OrdenRepository,
    puntos: PuntoRepository,
}

impl VehiculoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehiculoRepository::new(pool.clone()),
            ordenes: OrdenRepository::new(pool.clone()),
            puntos: PuntoRepository::new(pool),
        }
    }

    pub async fn buscar_por_placa(
        &self,
        config: &EnvironmentConfig,
        placa: &str,
        query: &VehiculoQuery,
    ) -> Result<VehiculoDetalleResponse, AppError> {
        let placa = normalizar_placa(placa);
        if placa.is_empty() {
            return Err(validation_error("placa", "La placa es requerida"));
        }

        let vehiculo = self
            .repository
            .find_by_placa(&placa)
            .await?
            .ok_or_else(|| not_found_error("Vehículo con placa", &placa))?;

        self.detalle(config, vehiculo, query).await
    }

    pub async fn get_by_id(
        &self,
        config: &EnvironmentConfig,
        id: Uuid,
        query: &VehiculoQuery,
    ) -> Result<VehiculoDetalleResponse, AppError> {
        let vehiculo = self.find(id).await?;
        self.detalle(config, vehiculo, query).await
    }

    /// Órdenes más recientes del vehículo
    pub async fn ordenes_recientes(
        &self,
        id: Uuid,
        query: &VehiculoQuery,
    ) -> Result<Vec<OrdenResponse>, AppError> {
        let vehiculo = self.find(id).await?;
        let ordenes = self
            .ordenes
            .recientes_por_vehiculo(vehiculo.id, query.limite_recientes())
            .await?;
        Ok(ordenes.into_iter().map(OrdenResponse::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Vehiculo, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    /// El umbral sale del punto consultado, o del valor por defecto
    async fn detalle(
        &self,
        config: &EnvironmentConfig,
        vehiculo: Vehiculo,
        query: &VehiculoQuery,
    ) -> Result<VehiculoDetalleResponse, AppError> {
        let umbral = match query.punto_id {
            Some(punto_id) => self
                .puntos
                .find_by_id(punto_id)
                .await?
                .ok_or_else(|| not_found_error("Punto", &punto_id.to_string()))?
                .umbral_fidelizacion,
            None => config.default_loyalty_threshold,
        };

        Ok(VehiculoDetalleResponse {
            fidelizacion: FidelizacionInfo::new(vehiculo.contador_actual, umbral),
            vehiculo: vehiculo.into(),
        })
    }
}
