//! Modelo de Orden
//!
//! Una orden nace `activa`, y termina `completada` (al cobrarse) o
//! `cancelada`. La comisión y la fidelización se aplican una sola vez,
//! en la transición a `completada`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::vehiculo::TipoVehiculo;

/// Estado de la orden - mapea al ENUM estado_orden
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_orden", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EstadoOrden {
    Activa,
    Completada,
    Cancelada,
}

impl EstadoOrden {
    pub fn es_final(&self) -> bool {
        !matches!(self, EstadoOrden::Activa)
    }
}

/// Método de pago - mapea al ENUM metodo_pago
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "metodo_pago", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MetodoPago {
    Efectivo,
    Tarjeta,
    Transferencia,
    Nequi,
}

/// Tipo de lavado - mapea al ENUM tipo_lavado
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "tipo_lavado", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoLavado {
    Basico,
    Completo,
    Premium,
}

/// Servicio realizado dentro de una orden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicioOrden {
    pub nombre: String,
    pub precio: Decimal,
}

/// Orden principal - mapea exactamente a la tabla ordenes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Orden {
    pub id: Uuid,
    pub numero: String,
    pub punto_id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub vehiculo_id: Uuid,
    pub placa: String,
    pub tipo_vehiculo: TipoVehiculo,
    pub tipo_lavado: TipoLavado,
    pub servicios: Json<Vec<ServicioOrden>>,
    pub subtotal: Decimal,
    pub descuento: Decimal,
    pub total: Decimal,
    pub metodo_pago: Option<MetodoPago>,
    pub lavador_id: Option<Uuid>,
    pub comision_porcentaje: Decimal,
    pub comision_monto: Decimal,
    pub contador_fidelizacion: Option<i32>,
    pub es_gratis: bool,
    pub estado: EstadoOrden,
    pub notas: Option<String>,
    pub creado_por: Option<Uuid>,
    pub completada_at: Option<DateTime<Utc>>,
    pub cancelada_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_final() {
        assert!(!EstadoOrden::Activa.es_final());
        assert!(EstadoOrden::Completada.es_final());
        assert!(EstadoOrden::Cancelada.es_final());
    }

    #[test]
    fn test_metodo_pago_serde() {
        let metodo: MetodoPago = serde_json::from_str("\"nequi\"").unwrap();
        assert_eq!(metodo, MetodoPago::Nequi);
        assert!(serde_json::from_str::<MetodoPago>("\"cheque\"").is_err());
    }
}
