use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::punto::{Punto, Tarifas};
use crate::utils::validation::validate_porcentaje;

/// Ningún precio de la tabla de tarifas puede ser negativo
pub fn validate_tarifas(tarifas: &Tarifas) -> Result<(), ValidationError> {
    let negativa = tarifas
        .values()
        .flat_map(|por_lavado| por_lavado.values())
        .any(|precio| *precio < Decimal::ZERO);
    if negativa {
        let mut error = ValidationError::new("tarifas");
        error.message = Some("Las tarifas no pueden ser negativas".into());
        return Err(error);
    }
    Ok(())
}

// Request para crear un punto
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePuntoRequest {
    #[validate(length(min = 2, max = 120))]
    pub nombre: String,
    #[validate(length(min = 3, max = 255))]
    pub direccion: String,
    #[validate(custom = "validate_tarifas")]
    pub tarifas: Option<Tarifas>,
    #[validate(range(min = 2, max = 100))]
    pub umbral_fidelizacion: Option<i32>,
    #[validate(custom = "validate_porcentaje")]
    pub porcentaje_comision: Option<Decimal>,
}

// Request para actualizar un punto
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePuntoRequest {
    #[validate(length(min = 2, max = 120))]
    pub nombre: Option<String>,
    #[validate(length(min = 3, max = 255))]
    pub direccion: Option<String>,
    #[validate(custom = "validate_tarifas")]
    pub tarifas: Option<Tarifas>,
    #[validate(range(min = 2, max = 100))]
    pub umbral_fidelizacion: Option<i32>,
    #[validate(custom = "validate_porcentaje")]
    pub porcentaje_comision: Option<Decimal>,
    pub activo: Option<bool>,
}

// Response de punto
#[derive(Debug, Serialize)]
pub struct PuntoResponse {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub tarifas: Tarifas,
    pub umbral_fidelizacion: i32,
    pub porcentaje_comision: Decimal,
    pub total_ordenes: i64,
    pub total_ingresos: Decimal,
    pub total_comisiones: Decimal,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Punto> for PuntoResponse {
    fn from(punto: Punto) -> Self {
        Self {
            id: punto.id,
            nombre: punto.nombre,
            direccion: punto.direccion,
            tarifas: punto.tarifas.0,
            umbral_fidelizacion: punto.umbral_fidelizacion,
            porcentaje_comision: punto.porcentaje_comision,
            total_ordenes: punto.total_ordenes,
            total_ingresos: punto.total_ingresos,
            total_comisiones: punto.total_comisiones,
            activo: punto.activo,
            created_at: punto.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tarifas_deserialize_from_json() {
        let request: CreatePuntoRequest = serde_json::from_value(json!({
            "nombre": "Sede Centro",
            "direccion": "Cra 7 # 10-20",
            "tarifas": { "auto": { "basico": 15000, "premium": "32000.50" } },
            "umbral_fidelizacion": 10
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        let tarifas = request.tarifas.unwrap();
        assert_eq!(tarifas.len(), 1);
    }

    #[test]
    fn test_negative_tariff_rejected() {
        let request: CreatePuntoRequest = serde_json::from_value(json!({
            "nombre": "Sede Centro",
            "direccion": "Cra 7 # 10-20",
            "tarifas": { "moto": { "basico": -1 } },
            "umbral_fidelizacion": 1,
            "porcentaje_comision": 120
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("tarifas"));
        assert!(fields.contains_key("umbral_fidelizacion"));
        assert!(fields.contains_key("porcentaje_comision"));
    }
}
