use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vehiculo_dto::FidelizacionInfo;
use crate::models::orden::{EstadoOrden, MetodoPago, Orden, ServicioOrden, TipoLavado};
use crate::models::vehiculo::TipoVehiculo;
use crate::utils::validation::{validate_monto, validate_placa};

// Servicio enviado al crear una orden
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServicioRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    #[validate(custom = "validate_monto")]
    pub precio: Decimal,
}

impl From<ServicioRequest> for ServicioOrden {
    fn from(servicio: ServicioRequest) -> Self {
        Self {
            nombre: servicio.nombre.trim().to_string(),
            precio: servicio.precio,
        }
    }
}

// Request para crear una orden
#[derive(Debug, Deserialize, Validate)]
pub struct CrearOrdenRequest {
    pub punto_id: Uuid,
    #[validate(custom = "validate_placa")]
    pub placa: String,
    pub tipo_lavado: Option<TipoLavado>,
    #[validate]
    #[serde(default)]
    pub servicios: Vec<ServicioRequest>,
    #[validate(custom = "validate_monto")]
    pub descuento: Option<Decimal>,
    pub lavador_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub notas: Option<String>,
}

// Request para cobrar (completar) una orden
#[derive(Debug, Deserialize)]
pub struct CobrarOrdenRequest {
    pub metodo_pago: MetodoPago,
    pub lavador_id: Option<Uuid>,
}

// Request para cancelar una orden
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CancelarOrdenRequest {
    #[validate(length(max = 500))]
    pub motivo: Option<String>,
}

// Filtros del historial de órdenes
#[derive(Debug, Default, Deserialize)]
pub struct OrdenFilters {
    pub fecha: Option<NaiveDate>,
    pub estado: Option<EstadoOrden>,
    pub lavador_id: Option<Uuid>,
    pub placa: Option<String>,
    pub punto_id: Option<Uuid>,
    pub limite: Option<i64>,
    pub pagina: Option<i64>,
}

// Response de orden
#[derive(Debug, Serialize)]
pub struct OrdenResponse {
    pub id: Uuid,
    pub numero: String,
    pub punto_id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Uuid,
    pub placa: String,
    pub tipo_vehiculo: TipoVehiculo,
    pub tipo_lavado: TipoLavado,
    pub servicios: Vec<ServicioOrden>,
    pub subtotal: Decimal,
    pub descuento: Decimal,
    pub total: Decimal,
    pub metodo_pago: Option<MetodoPago>,
    pub lavador_id: Option<Uuid>,
    pub comision: ComisionOrden,
    pub contador_fidelizacion: Option<i32>,
    pub es_gratis: bool,
    pub estado: EstadoOrden,
    pub notas: Option<String>,
    pub creado_por: Option<Uuid>,
    pub completada_at: Option<DateTime<Utc>>,
    pub cancelada_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Registro de comisión embebido en la orden
#[derive(Debug, Serialize)]
pub struct ComisionOrden {
    pub porcentaje: Decimal,
    pub monto: Decimal,
}

impl From<Orden> for OrdenResponse {
    fn from(orden: Orden) -> Self {
        Self {
            id: orden.id,
            numero: orden.numero,
            punto_id: orden.punto_id,
            cliente_id: orden.cliente_id,
            vehiculo_id: orden.vehiculo_id,
            placa: orden.placa,
            tipo_vehiculo: orden.tipo_vehiculo,
            tipo_lavado: orden.tipo_lavado,
            servicios: orden.servicios.0,
            subtotal: orden.subtotal,
            descuento: orden.descuento,
            total: orden.total,
            metodo_pago: orden.metodo_pago,
            lavador_id: orden.lavador_id,
            comision: ComisionOrden {
                porcentaje: orden.comision_porcentaje,
                monto: orden.comision_monto,
            },
            contador_fidelizacion: orden.contador_fidelizacion,
            es_gratis: orden.es_gratis,
            estado: orden.estado,
            notas: orden.notas,
            creado_por: orden.creado_por,
            completada_at: orden.completada_at,
            cancelada_at: orden.cancelada_at,
            created_at: orden.created_at,
        }
    }
}

// Orden recién creada, con la vista previa de fidelización
#[derive(Debug, Serialize)]
pub struct OrdenCreadaResponse {
    #[serde(flatten)]
    pub orden: OrdenResponse,
    pub sera_gratis: bool,
    pub fidelizacion: FidelizacionInfo,
}

// Resultado del cobro de una orden
#[derive(Debug, Serialize)]
pub struct CobroResponse {
    pub orden: OrdenResponse,
    pub fidelizacion: ResultadoFidelizacionResponse,
    pub comision: Option<ComisionAsignada>,
}

#[derive(Debug, Serialize)]
pub struct ResultadoFidelizacionResponse {
    pub contador_anterior: i32,
    pub contador_nuevo: i32,
    pub es_gratis: bool,
    pub lavados_restantes: i32,
}

#[derive(Debug, Serialize)]
pub struct ComisionAsignada {
    pub lavador_id: Uuid,
    pub porcentaje: Decimal,
    pub monto: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crear_orden_validation() {
        let ok: CrearOrdenRequest = serde_json::from_value(json!({
            "punto_id": Uuid::new_v4(),
            "placa": "ABC123",
            "servicios": [{ "nombre": "Lavado", "precio": 15000 }],
            "descuento": "1000"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: CrearOrdenRequest = serde_json::from_value(json!({
            "punto_id": Uuid::new_v4(),
            "placa": "A1",
            "servicios": [{ "nombre": "", "precio": -5 }],
            "descuento": -1
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("placa"));
        assert!(fields.contains_key("servicios"));
        assert!(fields.contains_key("descuento"));
    }

    #[test]
    fn test_servicios_default_empty() {
        let request: CrearOrdenRequest = serde_json::from_value(json!({
            "punto_id": Uuid::new_v4(),
            "placa": "ABC123",
            "tipo_lavado": "premium"
        }))
        .unwrap();
        assert!(request.servicios.is_empty());
        assert_eq!(request.tipo_lavado, Some(TipoLavado::Premium));
    }

    #[test]
    fn test_cobrar_requires_known_method() {
        assert!(serde_json::from_value::<CobrarOrdenRequest>(json!({ "metodo_pago": "efectivo" })).is_ok());
        assert!(serde_json::from_value::<CobrarOrdenRequest>(json!({ "metodo_pago": "bitcoin" })).is_err());
    }
}
