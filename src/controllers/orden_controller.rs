use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::api_response::{ApiResponse, ListResponse, Paginacion};
use crate::dto::orden_dto::{
    CancelarOrdenRequest, CobrarOrdenRequest, CobroResponse, ComisionAsignada, CrearOrdenRequest,
    OrdenCreadaResponse, OrdenFilters, OrdenResponse, ResultadoFidelizacionResponse,
};
use crate::dto::vehiculo_dto::FidelizacionInfo;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::orden::{EstadoOrden, Orden, ServicioOrden, TipoLavado};
use crate::models::usuario::{Rol, Usuario};
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::orden_repository::{FiltroOrdenes, OrdenRepository};
use crate::repositories::punto_repository::PuntoRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::{cobro, fidelizacion, numeracion, tarifas};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalizar_placa;

pub struct OrdenController {
    pool: PgPool,
    repository: OrdenRepository,
    puntos: PuntoRepository,
    vehiculos: VehiculoRepository,
    clientes: ClienteRepository,
    usuarios: UsuarioRepository,
}

impl OrdenController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrdenRepository::new(pool.clone()),
            puntos: PuntoRepository::new(pool.clone()),
            vehiculos: VehiculoRepository::new(pool.clone()),
            clientes: ClienteRepository::new(pool.clone()),
            usuarios: UsuarioRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear una orden activa para un vehículo registrado
    ///
    /// El contador de fidelización no se toca aquí; la respuesta solo
    /// anticipa si la orden saldría gratis al cobrarla.
    pub async fn crear(
        &self,
        actor: &AuthenticatedUser,
        config: &EnvironmentConfig,
        request: CrearOrdenRequest,
    ) -> Result<ApiResponse<OrdenCreadaResponse>, AppError> {
        actor.require("ordenes")?;
        request.validate()?;

        let punto = self
            .puntos
            .find_by_id(request.punto_id)
            .await?
            .ok_or_else(|| not_found_error("Punto", &request.punto_id.to_string()))?;
        if !punto.activo {
            return Err(AppError::BadRequest(format!(
                "El punto '{}' está inactivo",
                punto.nombre
            )));
        }

        let placa = normalizar_placa(&request.placa);
        let vehiculo = self
            .vehiculos
            .find_by_placa(&placa)
            .await?
            .ok_or_else(|| not_found_error("Vehículo con placa", &placa))?;

        let tipo_lavado = match request.tipo_lavado {
            Some(tipo) => tipo,
            None => match vehiculo.cliente_id {
                Some(cliente_id) => self
                    .clientes
                    .find_by_id(cliente_id)
                    .await?
                    .map(|c| c.tipo_lavado_preferido)
                    .unwrap_or(TipoLavado::Basico),
                None => TipoLavado::Basico,
            },
        };

        if let Some(lavador_id) = request.lavador_id {
            let lavador = self.usuarios.find_by_id(lavador_id).await?;
            check_lavador(lavador_id, lavador.as_ref())?;
        }

        let servicios = tarifas::resolver_servicios(
            &punto,
            vehiculo.tipo,
            tipo_lavado,
            request.servicios.into_iter().map(ServicioOrden::from).collect(),
        )?;
        let liquidacion = tarifas::liquidar(
            servicios,
            request.descuento.unwrap_or(Decimal::ZERO),
            false,
        );

        let now = Utc::now();
        let fecha = numeracion::fecha_local(now, config.business_offset());

        let orden = Orden {
            id: Uuid::new_v4(),
            numero: String::new(),
            punto_id: punto.id,
            cliente_id: vehiculo.cliente_id,
            vehiculo_id: vehiculo.id,
            placa: vehiculo.placa.clone(),
            tipo_vehiculo: vehiculo.tipo,
            tipo_lavado,
            servicios: Json(liquidacion.servicios),
            subtotal: liquidacion.subtotal,
            descuento: liquidacion.descuento,
            total: liquidacion.total,
            metodo_pago: None,
            lavador_id: request.lavador_id,
            comision_porcentaje: Decimal::ZERO,
            comision_monto: Decimal::ZERO,
            contador_fidelizacion: None,
            es_gratis: false,
            estado: EstadoOrden::Activa,
            notas: request
                .notas
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            creado_por: actor.autor_id(),
            completada_at: None,
            cancelada_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.pool.begin().await?;
        let secuencia = OrdenRepository::siguiente_secuencia(&mut *tx, fecha).await?;
        let orden = Orden {
            numero: numeracion::formatear_numero(fecha, secuencia),
            ..orden
        };
        let saved = OrdenRepository::insert(&mut *tx, &orden).await?;
        tx.commit().await?;

        let estado_fidelizacion =
            FidelizacionInfo::new(vehiculo.contador_actual, punto.umbral_fidelizacion);
        info!(
            "🧾 Orden {} creada para {} (total {}, próxima gratis: {})",
            saved.numero, saved.placa, saved.total, estado_fidelizacion.proximo_gratis
        );

        Ok(ApiResponse::success_with_message(
            OrdenCreadaResponse {
                orden: saved.into(),
                sera_gratis: estado_fidelizacion.proximo_gratis,
                fidelizacion: estado_fidelizacion,
            },
            "Orden creada exitosamente",
        ))
    }

    /// Historial de órdenes con filtros
    pub async fn list(
        &self,
        config: &EnvironmentConfig,
        filters: OrdenFilters,
    ) -> Result<ListResponse<OrdenResponse>, AppError> {
        let paginacion = Paginacion {
            limite: filters.limite,
            pagina: filters.pagina,
        };
        let filtro = FiltroOrdenes {
            rango: filters
                .fecha
                .map(|fecha| numeracion::rango_dia(fecha, config.business_offset()))
                .transpose()?,
            estado: filters.estado,
            lavador_id: filters.lavador_id,
            placa: filters
                .placa
                .as_deref()
                .map(normalizar_placa)
                .filter(|p| !p.is_empty()),
            punto_id: filters.punto_id,
        };

        let (ordenes, total) = self
            .repository
            .list(&filtro, paginacion.limit(), paginacion.offset())
            .await?;

        Ok(ListResponse::new(
            ordenes.into_iter().map(OrdenResponse::from).collect(),
            total,
            &paginacion,
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<OrdenResponse, AppError> {
        let orden = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Orden", &id.to_string()))?;
        Ok(orden.into())
    }

    /// Cobrar una orden activa
    ///
    /// Todo ocurre en una transacción con la orden y el vehículo bloqueados:
    /// fidelización, total final, comisión del lavador y estadísticas del punto.
    pub async fn cobrar(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: CobrarOrdenRequest,
    ) -> Result<ApiResponse<CobroResponse>, AppError> {
        actor.require("cobros")?;

        let mut tx = self.pool.begin().await?;

        let orden = OrdenRepository::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("Orden", &id.to_string()))?;
        if orden.estado.es_final() {
            return Err(cobro::estado_invalido(&orden, "cobrar"));
        }

        let lavador_id = request.lavador_id.or(orden.lavador_id);
        if let Some(lavador_id) = lavador_id {
            let lavador = UsuarioRepository::find_by_id_tx(&mut *tx, lavador_id).await?;
            check_lavador(lavador_id, lavador.as_ref())?;
        }

        let punto = PuntoRepository::find_by_id_tx(&mut *tx, orden.punto_id)
            .await?
            .ok_or_else(|| not_found_error("Punto", &orden.punto_id.to_string()))?;
        let vehiculo = VehiculoRepository::find_by_id_for_update(&mut *tx, orden.vehiculo_id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &orden.vehiculo_id.to_string()))?;

        let cobrado = cobro::aplicar_cobro(
            orden,
            vehiculo.contador_actual,
            &punto,
            lavador_id,
            request.metodo_pago,
            Utc::now(),
        )?;
        let resultado = cobrado.fidelizacion;
        let (porcentaje, monto) = (cobrado.orden.comision_porcentaje, cobrado.comision_monto());

        let orden = OrdenRepository::completar(&mut *tx, &cobrado.orden).await?;
        VehiculoRepository::registrar_lavado(
            &mut *tx,
            vehiculo.id,
            resultado.contador_nuevo,
            resultado.es_gratis,
        )
        .await?;
        acreditar(&mut *tx, lavador_id, monto).await?;
        PuntoRepository::sumar_orden(&mut *tx, punto.id, orden.total, monto).await?;

        tx.commit().await?;

        if resultado.es_gratis {
            info!("🎉 Orden {} cobrada como lavado gratis ({})", orden.numero, orden.placa);
        } else {
            info!(
                "💵 Orden {} cobrada: {} por {:?}",
                orden.numero, orden.total, request.metodo_pago
            );
        }

        let asignada = lavador_id.map(|lavador_id| ComisionAsignada {
            lavador_id,
            porcentaje,
            monto,
        });
        let mensaje = if resultado.es_gratis {
            "Orden cobrada: lavado gratis por fidelización"
        } else {
            "Orden cobrada exitosamente"
        };

        Ok(ApiResponse::success_with_message(
            CobroResponse {
                orden: orden.into(),
                fidelizacion: ResultadoFidelizacionResponse {
                    contador_anterior: resultado.contador_anterior,
                    contador_nuevo: resultado.contador_nuevo,
                    es_gratis: resultado.es_gratis,
                    lavados_restantes: fidelizacion::lavados_restantes(
                        resultado.contador_nuevo,
                        punto.umbral_fidelizacion,
                    ),
                },
                comision: asignada,
            },
            mensaje,
        ))
    }

    pub async fn cancelar(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: CancelarOrdenRequest,
    ) -> Result<ApiResponse<OrdenResponse>, AppError> {
        actor.require("ordenes")?;
        request.validate()?;

        let motivo = request
            .motivo
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        match self.repository.cancelar(id, motivo).await? {
            Some(orden) => {
                warn!("🚫 Orden {} cancelada", orden.numero);
                Ok(ApiResponse::success_with_message(
                    orden.into(),
                    "Orden cancelada exitosamente",
                ))
            }
            None => {
                let orden = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found_error("Orden", &id.to_string()))?;
                Err(cobro::estado_invalido(&orden, "cancelar"))
            }
        }
    }
}

async fn acreditar(
    conn: &mut PgConnection,
    lavador_id: Option<Uuid>,
    monto: Decimal,
) -> Result<(), AppError> {
    match lavador_id {
        Some(lavador_id) => UsuarioRepository::acreditar_comision(conn, lavador_id, monto).await,
        None => Ok(()),
    }
}

/// El lavador asignado debe existir, estar activo y tener rol lavador
fn check_lavador(id: Uuid, lavador: Option<&Usuario>) -> Result<(), AppError> {
    match lavador {
        None => Err(not_found_error("Lavador", &id.to_string())),
        Some(u) if u.rol != Rol::Lavador => Err(AppError::BadRequest(format!(
            "El usuario '{}' no es lavador",
            u.codigo
        ))),
        Some(u) if !u.activo => Err(AppError::BadRequest(format!(
            "El lavador '{}' está inactivo",
            u.codigo
        ))),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(rol: Rol, activo: bool) -> Usuario {
        let mut u = Usuario::new(
            "lav01".to_string(),
            "Pedro".to_string(),
            "hash".to_string(),
            rol,
            rol.permisos_por_defecto(),
            None,
        );
        u.activo = activo;
        u
    }

    #[test]
    fn test_check_lavador() {
        let id = Uuid::new_v4();
        assert!(check_lavador(id, Some(&usuario(Rol::Lavador, true))).is_ok());
        assert!(matches!(check_lavador(id, None), Err(AppError::NotFound(_))));
        assert!(matches!(
            check_lavador(id, Some(&usuario(Rol::Cajero, true))),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            check_lavador(id, Some(&usuario(Rol::Lavador, false))),
            Err(AppError::BadRequest(_))
        ));
    }
}
