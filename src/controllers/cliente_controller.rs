use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::api_response::{ApiResponse, ListResponse, Paginacion};
use crate::dto::cliente_dto::{
    ClienteDetalleResponse, ClienteFilters, ClienteResponse, RegistrarClienteRequest,
    UpdateClienteRequest,
};
use crate::dto::vehiculo_dto::FidelizacionInfo;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::cliente::Cliente;
use crate::models::orden::TipoLavado;
use crate::models::vehiculo::Vehiculo;
use crate::repositories::cliente_repository::ClienteRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::services::fidelizacion;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError};
use crate::utils::validation::{normalizar_placa, normalizar_telefono};

pub struct ClienteController {
    pool: PgPool,
    repository: ClienteRepository,
    vehiculos: VehiculoRepository,
}

impl ClienteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClienteRepository::new(pool.clone()),
            vehiculos: VehiculoRepository::new(pool.clone()),
            pool,
        }
    }

    /// Registrar cliente y vehículo en una sola transacción
    pub async fn registrar(
        &self,
        actor: &AuthenticatedUser,
        config: &EnvironmentConfig,
        request: RegistrarClienteRequest,
    ) -> Result<ApiResponse<ClienteDetalleResponse>, AppError> {
        actor.require("clientes")?;
        request.validate()?;

        let placa = normalizar_placa(&request.placa);
        let telefono = normalizar_telefono(&request.telefono);

        if self.vehiculos.placa_exists(&placa).await? {
            return Err(conflict_error("un vehículo", "placa", &placa));
        }
        if self.repository.telefono_exists(&telefono).await? {
            return Err(conflict_error("un cliente", "teléfono", &telefono));
        }

        let umbral = config.default_loyalty_threshold;
        let lavados_iniciales = request.lavados_iniciales.unwrap_or(0);
        let contador = fidelizacion::contador_inicial(lavados_iniciales, umbral);

        let cliente = Cliente::new(
            request.nombre.trim().to_string(),
            telefono,
            request.tipo_lavado_preferido.unwrap_or(TipoLavado::Basico),
            placa.clone(),
            lavados_iniciales,
        );
        let mut vehiculo = Vehiculo::new(placa, request.tipo_vehiculo, contador);
        vehiculo.cliente_id = Some(cliente.id);

        let mut tx = self.pool.begin().await?;
        ClienteRepository::insert(&mut *tx, &cliente).await?;
        let vehiculo = VehiculoRepository::insert(&mut *tx, &vehiculo).await?;
        let cliente = ClienteRepository::set_vehiculo(&mut *tx, cliente.id, vehiculo.id).await?;
        tx.commit().await?;

        info!(
            "🚗 Cliente registrado: {} con vehículo {} (contador {})",
            cliente.nombre, vehiculo.placa, vehiculo.contador_actual
        );

        let fidelizacion = FidelizacionInfo::new(vehiculo.contador_actual, umbral);
        Ok(ApiResponse::success_with_message(
            ClienteDetalleResponse {
                cliente: cliente.into(),
                vehiculo: Some(vehiculo.into()),
                fidelizacion: Some(fidelizacion),
            },
            "Cliente registrado exitosamente",
        ))
    }

    pub async fn list(&self, filters: ClienteFilters) -> Result<ListResponse<ClienteResponse>, AppError> {
        let paginacion = Paginacion {
            limite: filters.limite,
            pagina: filters.pagina,
        };
        let q = filters
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let (clientes, total) = self
            .repository
            .search(q, paginacion.limit(), paginacion.offset())
            .await?;

        Ok(ListResponse::new(
            clientes.into_iter().map(ClienteResponse::from).collect(),
            total,
            &paginacion,
        ))
    }

    /// Buscar el cliente dueño de una placa, con su vehículo y fidelización
    pub async fn buscar_por_placa(
        &self,
        config: &EnvironmentConfig,
        placa: &str,
    ) -> Result<ClienteDetalleResponse, AppError> {
        let placa = normalizar_placa(placa);
        if placa.is_empty() {
            return Err(validation_error("placa", "La placa es requerida"));
        }

        let cliente = self
            .repository
            .find_by_placa(&placa)
            .await?
            .ok_or_else(|| not_found_error("Cliente con placa", &placa))?;

        self.detalle(config, cliente).await
    }

    pub async fn get_by_id(
        &self,
        config: &EnvironmentConfig,
        id: Uuid,
    ) -> Result<ClienteDetalleResponse, AppError> {
        let cliente = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))?;

        self.detalle(config, cliente).await
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateClienteRequest,
    ) -> Result<ApiResponse<ClienteResponse>, AppError> {
        actor.require("clientes")?;
        request.validate()?;

        let mut cliente = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", &id.to_string()))?;

        if let Some(nombre) = request.nombre {
            cliente.nombre = nombre.trim().to_string();
        }
        if let Some(telefono) = request.telefono {
            let telefono = normalizar_telefono(&telefono);
            if telefono != cliente.telefono && self.repository.telefono_exists(&telefono).await? {
                return Err(conflict_error("un cliente", "teléfono", &telefono));
            }
            cliente.telefono = telefono;
        }
        if let Some(tipo) = request.tipo_lavado_preferido {
            cliente.tipo_lavado_preferido = tipo;
        }

        let updated = self.repository.update(&cliente).await?;
        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Cliente actualizado exitosamente",
        ))
    }

    async fn detalle(
        &self,
        config: &EnvironmentConfig,
        cliente: Cliente,
    ) -> Result<ClienteDetalleResponse, AppError> {
        let vehiculo = match cliente.vehiculo_id {
            Some(vehiculo_id) => self.vehiculos.find_by_id(vehiculo_id).await?,
            None => None,
        };
        let fidelizacion = vehiculo
            .as_ref()
            .map(|v| FidelizacionInfo::new(v.contador_actual, config.default_loyalty_threshold));

        Ok(ClienteDetalleResponse {
            cliente: cliente.into(),
            vehiculo: vehiculo.map(Into::into),
            fidelizacion,
        })
    }
}
