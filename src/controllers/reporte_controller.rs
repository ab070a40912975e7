use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::config::EnvironmentConfig;
use crate::dto::reporte_dto::{
    CierreCajaQuery, CierreCajaResponse, ComisionesQuery, ComisionesResponse, EstadisticasPunto,
    EstadisticasQuery, EstadisticasResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::punto_repository::PuntoRepository;
use crate::repositories::reporte_repository::ReporteRepository;
use crate::services::numeracion;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct ReporteController {
    repository: ReporteRepository,
    puntos: PuntoRepository,
}

impl ReporteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReporteRepository::new(pool.clone()),
            puntos: PuntoRepository::new(pool),
        }
    }

    /// Cierre de caja de un día (por defecto, el día de hoy)
    pub async fn cierre_caja(
        &self,
        actor: &AuthenticatedUser,
        config: &EnvironmentConfig,
        query: CierreCajaQuery,
    ) -> Result<CierreCajaResponse, AppError> {
        actor.require("reportes")?;

        let offset = config.business_offset();
        let fecha = query
            .fecha
            .unwrap_or_else(|| numeracion::fecha_local(Utc::now(), offset));
        let (inicio, fin) = numeracion::rango_dia(fecha, offset)?;
        debug!("📊 Cierre de caja {} ({} - {})", fecha, inicio, fin);

        let resumen = self
            .repository
            .resumen_dia(inicio, fin, query.punto_id)
            .await?;
        let por_metodo = self
            .repository
            .por_metodo_pago(inicio, fin, query.punto_id)
            .await?;

        Ok(CierreCajaResponse::new(fecha, query.punto_id, resumen, por_metodo))
    }

    /// Comisiones por lavador entre dos fechas, ambas incluidas
    pub async fn comisiones(
        &self,
        actor: &AuthenticatedUser,
        config: &EnvironmentConfig,
        query: ComisionesQuery,
    ) -> Result<ComisionesResponse, AppError> {
        actor.require("comisiones")?;

        let offset = config.business_offset();
        let hoy = numeracion::fecha_local(Utc::now(), offset);
        let (desde, hasta) = rango_consulta(query.desde, query.hasta, hoy)?;
        let (inicio, fin) = numeracion::rango_dias(desde, hasta, offset)?;

        let lavadores = self
            .repository
            .comisiones(inicio, fin, query.lavador_id, query.punto_id)
            .await?;
        let total_comisiones: Decimal = lavadores.iter().map(|l| l.total_comision).sum();

        Ok(ComisionesResponse {
            desde,
            hasta,
            total_comisiones,
            lavadores,
        })
    }

    /// Estadísticas del encabezado: actividad de hoy y totales del punto
    pub async fn estadisticas(
        &self,
        config: &EnvironmentConfig,
        query: EstadisticasQuery,
    ) -> Result<EstadisticasResponse, AppError> {
        let offset = config.business_offset();
        let fecha = numeracion::fecha_local(Utc::now(), offset);
        let (inicio, fin) = numeracion::rango_dia(fecha, offset)?;

        let punto = match query.punto_id {
            Some(punto_id) => {
                let punto = self
                    .puntos
                    .find_by_id(punto_id)
                    .await?
                    .ok_or_else(|| not_found_error("Punto", &punto_id.to_string()))?;
                Some(EstadisticasPunto {
                    punto_id: punto.id,
                    nombre: punto.nombre,
                    total_ordenes: punto.total_ordenes,
                    total_ingresos: punto.total_ingresos,
                    total_comisiones: punto.total_comisiones,
                })
            }
            None => None,
        };

        let conteo = self.repository.conteo_hoy(inicio, fin, query.punto_id).await?;
        let ordenes_activas = self.repository.ordenes_activas(query.punto_id).await?;
        let (clientes_registrados, clientes_nuevos_hoy) =
            self.repository.clientes(inicio, fin).await?;

        Ok(EstadisticasResponse {
            fecha,
            ordenes_hoy: conteo.ordenes_hoy,
            ordenes_activas,
            completadas_hoy: conteo.completadas_hoy,
            ingresos_hoy: conteo.ingresos_hoy,
            lavados_gratis_hoy: conteo.lavados_gratis_hoy,
            clientes_registrados,
            clientes_nuevos_hoy,
            punto,
        })
    }
}

/// Completar el rango con la fecha de hoy y rechazar rangos invertidos
fn rango_consulta(
    desde: Option<NaiveDate>,
    hasta: Option<NaiveDate>,
    hoy: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let hasta = hasta.unwrap_or(hoy);
    let desde = desde.unwrap_or(hasta);
    if hasta < desde {
        return Err(validation_error(
            "hasta",
            "La fecha final no puede ser anterior a la inicial",
        ));
    }
    Ok((desde, hasta))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dia(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_rango_por_defecto_es_hoy() {
        assert_eq!(rango_consulta(None, None, dia(15)).unwrap(), (dia(15), dia(15)));
        assert_eq!(rango_consulta(Some(dia(1)), None, dia(15)).unwrap(), (dia(1), dia(15)));
        assert_eq!(rango_consulta(None, Some(dia(3)), dia(15)).unwrap(), (dia(3), dia(3)));
    }

    #[test]
    fn test_rango_invertido() {
        let err = rango_consulta(Some(dia(10)), Some(dia(2)), dia(15)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
