use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vehiculo_dto::{FidelizacionInfo, VehiculoResponse};
use crate::models::cliente::Cliente;
use crate::models::orden::TipoLavado;
use crate::models::vehiculo::TipoVehiculo;
use crate::utils::validation::{validate_placa, validate_telefono};

// Request para registrar un cliente junto con su vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarClienteRequest {
    #[validate(length(min = 2, max = 120))]
    pub nombre: String,
    #[validate(custom = "validate_telefono")]
    pub telefono: String,
    pub tipo_lavado_preferido: Option<TipoLavado>,
    #[validate(custom = "validate_placa")]
    pub placa: String,
    pub tipo_vehiculo: TipoVehiculo,
    #[validate(range(min = 0, max = 9))]
    pub lavados_iniciales: Option<i32>,
}

// Request para actualizar un cliente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClienteRequest {
    #[validate(length(min = 2, max = 120))]
    pub nombre: Option<String>,
    #[validate(custom = "validate_telefono")]
    pub telefono: Option<String>,
    pub tipo_lavado_preferido: Option<TipoLavado>,
}

// Filtros del listado de clientes
#[derive(Debug, Default, Deserialize)]
pub struct ClienteFilters {
    pub q: Option<String>,
    pub limite: Option<i64>,
    pub pagina: Option<i64>,
}

// Response de cliente
#[derive(Debug, Serialize)]
pub struct ClienteResponse {
    pub id: Uuid,
    pub nombre: String,
    pub telefono: String,
    pub tipo_lavado_preferido: TipoLavado,
    pub placa: String,
    pub vehiculo_id: Option<Uuid>,
    pub lavados_iniciales: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Cliente> for ClienteResponse {
    fn from(cliente: Cliente) -> Self {
        Self {
            id: cliente.id,
            nombre: cliente.nombre,
            telefono: cliente.telefono,
            tipo_lavado_preferido: cliente.tipo_lavado_preferido,
            placa: cliente.placa,
            vehiculo_id: cliente.vehiculo_id,
            lavados_iniciales: cliente.lavados_iniciales,
            created_at: cliente.created_at,
        }
    }
}

// Cliente con su vehículo y el estado de fidelización
#[derive(Debug, Serialize)]
pub struct ClienteDetalleResponse {
    pub cliente: ClienteResponse,
    pub vehiculo: Option<VehiculoResponse>,
    pub fidelizacion: Option<FidelizacionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registrar_cliente_validation() {
        let ok: RegistrarClienteRequest = serde_json::from_value(json!({
            "nombre": "María Gómez",
            "telefono": "3001234567",
            "placa": "abc-123",
            "tipo_vehiculo": "auto",
            "lavados_iniciales": 3
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: RegistrarClienteRequest = serde_json::from_value(json!({
            "nombre": "M",
            "telefono": "12",
            "placa": "??",
            "tipo_vehiculo": "moto",
            "lavados_iniciales": 10
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        for campo in ["nombre", "telefono", "placa", "lavados_iniciales"] {
            assert!(fields.contains_key(campo), "falta error en {}", campo);
        }
    }

    #[test]
    fn test_unknown_vehicle_type_rejected() {
        let result = serde_json::from_value::<RegistrarClienteRequest>(json!({
            "nombre": "Luis",
            "telefono": "3001234567",
            "placa": "ABC123",
            "tipo_vehiculo": "avion"
        }));
        assert!(result.is_err());
    }
}
